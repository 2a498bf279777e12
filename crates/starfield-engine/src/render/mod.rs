//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams (or, for the backdrop, a gradient) and
//! issue GPU commands via wgpu. Each renderer owns its GPU resources.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
