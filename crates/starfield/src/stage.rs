use rand::SeedableRng;
use rand::rngs::StdRng;

use starfield_engine::scene::DrawList;

use crate::config::StarFieldConfig;
use crate::field::StarField;
use crate::globe::{Globe, GLOBE_LAYER};
use crate::host::{
    FrameQueue, FrameRequestId, FrameScheduler, Host, PixelSize, ResizeListenerId,
    ResizeListeners, ResizeSource,
};
use crate::surface::SceneSurface;

// ── WindowHost ────────────────────────────────────────────────────────────

/// `Host` backed by a window: the viewport is the window's logical size and
/// frame requests wait in a [`FrameQueue`] until the next redraw.
#[derive(Debug, Default)]
pub struct WindowHost {
    viewport: PixelSize,
    surface: SceneSurface,
    frames: FrameQueue,
    listeners: ResizeListeners,
}

impl WindowHost {
    pub fn new(viewport: PixelSize) -> Self {
        Self { viewport, ..Self::default() }
    }

    #[inline]
    pub fn set_viewport(&mut self, viewport: PixelSize) {
        self.viewport = viewport;
    }

    #[inline]
    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }

    #[inline]
    pub fn listeners(&self) -> &ResizeListeners {
        &self.listeners
    }

    #[inline]
    pub fn scene(&self) -> &SceneSurface {
        &self.surface
    }

    #[inline]
    pub fn draw_list_mut(&mut self) -> &mut DrawList {
        self.surface.draw_list_mut()
    }
}

impl FrameScheduler for WindowHost {
    fn request_frame(&mut self) -> FrameRequestId {
        self.frames.request_frame()
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.frames.cancel_frame(id);
    }
}

impl ResizeSource for WindowHost {
    fn subscribe_resize(&mut self) -> ResizeListenerId {
        self.listeners.subscribe_resize()
    }

    fn unsubscribe_resize(&mut self, id: ResizeListenerId) {
        self.listeners.unsubscribe_resize(id);
    }
}

impl Host for WindowHost {
    type Surface = SceneSurface;

    fn viewport(&self) -> PixelSize {
        self.viewport
    }

    fn surface(&mut self) -> Option<&mut SceneSurface> {
        Some(&mut self.surface)
    }
}

// ── Stage ─────────────────────────────────────────────────────────────────

/// Everything drawn in one window: the star field and, optionally, the globe.
///
/// Platform-free; the application feeds it viewport sizes and redraws.
#[derive(Debug)]
pub struct Stage {
    host: WindowHost,
    rng: StdRng,
    config: StarFieldConfig,
    field: Option<StarField>,
    globe: Option<Globe>,
    mounted: bool,
}

impl Stage {
    /// `seed` makes the population reproducible; `None` seeds from the OS.
    pub fn new(config: StarFieldConfig, seed: Option<u64>, globe: bool) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            host: WindowHost::default(),
            rng,
            config,
            field: None,
            globe: globe.then(Globe::new),
            mounted: false,
        }
    }

    /// Mounts the star field over `viewport`. Only the first call has an effect.
    pub fn mount(&mut self, viewport: PixelSize) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.host.set_viewport(viewport);
        self.field = StarField::mount_with(&mut self.host, &mut self.rng, &self.config);
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// One display refresh: runs every due frame request, then moves the globe.
    pub fn redraw(&mut self) {
        let due = self.host.frames.take_due();
        if let Some(field) = self.field.as_mut() {
            for _ in &due {
                field.frame(&mut self.host);
            }
        }

        let viewport = self.host.viewport;
        let draw_list = self.host.surface.draw_list_mut();
        draw_list.clear_layer(GLOBE_LAYER);
        if let Some(globe) = self.globe.as_mut() {
            globe.advance();
            if let Some((center, radius)) = Globe::fit(viewport) {
                globe.paint(draw_list, center, radius);
            }
        }
    }

    /// Delivers a viewport change to every installed listener.
    pub fn resize(&mut self, viewport: PixelSize) {
        self.host.set_viewport(viewport);
        let Some(field) = self.field.as_ref() else { return };
        if field.resize_listener().is_some_and(|id| self.host.listeners.is_subscribed(id)) {
            field.on_resize(&mut self.host);
        }
    }

    /// Tears the field down before the window goes away.
    pub fn close(&mut self) {
        if let Some(field) = self.field.as_mut() {
            field.teardown(&mut self.host);
        }
    }

    /// True while a frame request is waiting for the next refresh.
    #[inline]
    pub fn wants_frame(&self) -> bool {
        self.host.frames.has_pending()
    }

    #[inline]
    pub fn field(&self) -> Option<&StarField> {
        self.field.as_ref()
    }

    #[inline]
    pub fn globe(&self) -> Option<&Globe> {
        self.globe.as_ref()
    }

    #[inline]
    pub fn host(&self) -> &WindowHost {
        &self.host
    }

    #[inline]
    pub fn draw_list_mut(&mut self) -> &mut DrawList {
        self.host.draw_list_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::LoopState;
    use crate::host::DrawSurface;
    use crate::surface::STAR_LAYER;

    fn stage(globe: bool) -> Stage {
        Stage::new(StarFieldConfig::default(), Some(7), globe)
    }

    fn count_on(stage: &Stage, layer: starfield_engine::scene::ZIndex) -> usize {
        stage.host().scene().draw_list().items().iter().filter(|i| i.key.z == layer).count()
    }

    #[test]
    fn nothing_is_scheduled_before_mount() {
        let s = stage(false);
        assert!(!s.is_mounted());
        assert!(!s.wants_frame());
        assert!(s.field().is_none());
    }

    #[test]
    fn mount_schedules_the_first_frame() {
        let mut s = stage(false);
        s.mount(PixelSize::new(800, 600));
        assert!(s.wants_frame());
        assert_eq!(s.host().scene().size(), PixelSize::new(800, 600));
        assert_eq!(s.field().map(|f| f.stars().len()), Some(200));
        assert_eq!(s.host().listeners().len(), 1);
    }

    #[test]
    fn mount_only_happens_once() {
        let mut s = stage(false);
        s.mount(PixelSize::new(800, 600));
        let first = s.field().map(|f| f.stars()[0]);
        s.mount(PixelSize::new(10, 10));
        assert_eq!(s.field().map(|f| f.stars()[0]), first);
        assert_eq!(s.host().listeners().len(), 1);
    }

    #[test]
    fn redraw_runs_the_frame_and_requests_another() {
        let mut s = stage(false);
        s.mount(PixelSize::new(800, 600));
        s.redraw();
        s.redraw();
        assert_eq!(s.field().map(|f| f.frame_counter()), Some(2));
        assert!(s.wants_frame());
        assert_eq!(count_on(&s, STAR_LAYER), 200);
        assert_eq!(count_on(&s, GLOBE_LAYER), 0);
    }

    #[test]
    fn globe_is_repainted_each_redraw() {
        let mut s = stage(true);
        s.mount(PixelSize::new(1280, 720));
        s.redraw();
        let after_one = count_on(&s, GLOBE_LAYER);
        s.redraw();
        assert_eq!(count_on(&s, GLOBE_LAYER), after_one);
        assert!(after_one >= 4);
        assert_eq!(s.globe().map(|g| g.rotation()), Some(1.0));
    }

    #[test]
    fn resize_reaches_the_field() {
        let mut s = stage(false);
        s.mount(PixelSize::new(800, 600));
        let x0 = s.field().map(|f| f.stars()[0].x());
        s.resize(PixelSize::new(400, 300));
        assert_eq!(s.host().scene().size(), PixelSize::new(400, 300));
        assert_eq!(s.field().map(|f| f.stars()[0].x()), x0);
    }

    #[test]
    fn close_stops_the_loop() {
        let mut s = stage(true);
        s.mount(PixelSize::new(800, 600));
        s.redraw();
        s.close();
        assert!(!s.wants_frame());
        assert_eq!(s.field().map(|f| f.state()), Some(LoopState::Stopped));
        assert!(s.host().listeners().is_empty());

        s.resize(PixelSize::new(100, 100));
        assert_eq!(s.host().scene().size(), PixelSize::new(800, 600));
    }

    #[test]
    fn same_seed_same_sky() {
        let mut a = stage(false);
        let mut b = stage(false);
        a.mount(PixelSize::new(640, 480));
        b.mount(PixelSize::new(640, 480));
        assert_eq!(a.field().map(|f| f.stars().to_vec()), b.field().map(|f| f.stars().to_vec()));
    }
}
