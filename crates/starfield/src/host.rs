//! Host capabilities the effects draw and schedule through.
//!
//! The window runtime implements these for real; tests implement them in memory.
//! `FrameQueue` and `ResizeListeners` are complete implementations of the two
//! bookkeeping capabilities and are shared by both.

use starfield_engine::coords::Vec2;
use starfield_engine::paint::Color;

// ── sizes and ids ─────────────────────────────────────────────────────────

/// Size in whole pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rounds a logical size to whole pixels. Negative and non-finite values become 0.
    pub fn from_logical(width: f32, height: f32) -> Self {
        fn px(v: f32) -> u32 {
            if v.is_finite() && v > 0.0 { v.round() as u32 } else { 0 }
        }
        Self::new(px(width), px(height))
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Handle for a pending frame request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(u64);

/// Handle for an installed resize listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResizeListenerId(u64);

// ── capabilities ──────────────────────────────────────────────────────────

/// A 2D raster target with a mutable pixel size.
pub trait DrawSurface {
    fn size(&self) -> PixelSize;

    fn set_size(&mut self, size: PixelSize);

    /// Erases everything previously drawn.
    fn clear(&mut self);

    /// Fills a circle. `color` carries the alpha to composite with.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Frame-presentation primitive: a request fires once, on the next display refresh.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId;

    /// Cancelling an unknown or already-fired request is a no-op.
    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// Source of viewport-resize notifications.
pub trait ResizeSource {
    fn subscribe_resize(&mut self) -> ResizeListenerId;

    fn unsubscribe_resize(&mut self, id: ResizeListenerId);
}

/// Everything an effect needs from the environment it runs in.
pub trait Host: FrameScheduler + ResizeSource {
    type Surface: DrawSurface;

    /// Current viewport size.
    fn viewport(&self) -> PixelSize;

    /// The drawing surface, or `None` when it (or its drawing context) is unavailable.
    fn surface(&mut self) -> Option<&mut Self::Surface>;
}

// ── FrameQueue ────────────────────────────────────────────────────────────

/// In-memory `FrameScheduler`.
///
/// Requests accumulate until the owner drains them with [`FrameQueue::take_due`]
/// at the next refresh and runs the callbacks they stand for.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameRequestId>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every pending request, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameRequestId> {
        std::mem::take(&mut self.pending)
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[inline]
    pub fn is_pending(&self, id: FrameRequestId) -> bool {
        self.pending.contains(&id)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_id);
        self.next_id += 1;
        self.pending.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.pending.retain(|&p| p != id);
    }
}

// ── ResizeListeners ───────────────────────────────────────────────────────

/// In-memory `ResizeSource`: a registry of listener ids.
#[derive(Debug, Default)]
pub struct ResizeListeners {
    next_id: u64,
    active: Vec<ResizeListenerId>,
}

impl ResizeListeners {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_subscribed(&self, id: ResizeListenerId) -> bool {
        self.active.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Installed listeners, in subscription order.
    pub fn iter(&self) -> impl Iterator<Item = ResizeListenerId> + '_ {
        self.active.iter().copied()
    }
}

impl ResizeSource for ResizeListeners {
    fn subscribe_resize(&mut self) -> ResizeListenerId {
        let id = ResizeListenerId(self.next_id);
        self.next_id += 1;
        self.active.push(id);
        id
    }

    fn unsubscribe_resize(&mut self, id: ResizeListenerId) {
        self.active.retain(|&l| l != id);
    }
}
