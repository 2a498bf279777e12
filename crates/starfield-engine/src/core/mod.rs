//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the effect layer,
//! without leaking runtime internals.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
