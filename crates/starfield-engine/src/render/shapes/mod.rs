//! Shape renderers.

mod common;

pub mod backdrop;
pub mod circle;
