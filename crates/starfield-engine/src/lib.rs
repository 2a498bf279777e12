//! Starfield engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the effect layer:
//! the window loop, the GPU device, the draw list, and the shape renderers.

pub mod device;
pub mod window;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
