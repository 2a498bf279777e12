use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime does not redraw continuously: a window is presented again only
/// while [`App::wants_frame`] returns true for it.
pub trait App {
    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called after the runtime has reconfigured the surface for a new window size.
    fn on_resize(&mut self, window: &WindowCtx<'_>) -> AppControl {
        let _ = window;
        AppControl::Continue
    }

    /// Called once per presented frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Whether `window_id` should be redrawn on the next display refresh.
    fn wants_frame(&self, window_id: WindowId) -> bool {
        let _ = window_id;
        true
    }

    /// Called right before the runtime destroys a window.
    fn on_close(&mut self, window_id: WindowId) {
        let _ = window_id;
    }
}
