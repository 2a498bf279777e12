//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer.
//! Redraws are requested on demand: only while the app wants another frame.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
