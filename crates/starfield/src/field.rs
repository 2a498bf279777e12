use crate::config::StarFieldConfig;
use crate::host::{DrawSurface, FrameRequestId, Host, ResizeListenerId};
use crate::random::RandomSource;
use crate::star::{populate, Star};

/// Whether the frame loop reschedules itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// A mounted, animating star field.
///
/// Lifecycle:
/// - [`StarField::mount`] sizes the surface, seeds the population, requests frame 0
///   and subscribes to resizes.
/// - The host calls [`StarField::frame`] whenever a request it issued comes due;
///   each frame requests the next one while running.
/// - [`StarField::on_resize`] keeps the surface sized to the viewport.
/// - [`StarField::teardown`] cancels the pending request and unsubscribes.
///
/// The population is fixed for the lifetime of the instance.
#[derive(Debug)]
pub struct StarField {
    stars: Vec<Star>,
    config: StarFieldConfig,
    frame_counter: u64,
    state: LoopState,
    pending_frame: Option<FrameRequestId>,
    resize_listener: Option<ResizeListenerId>,
}

impl StarField {
    /// Mounts with the default configuration.
    pub fn mount<H, R>(host: &mut H, rng: &mut R) -> Option<Self>
    where
        H: Host,
        R: RandomSource + ?Sized,
    {
        Self::mount_with(host, rng, &StarFieldConfig::default())
    }

    /// Mounts onto `host`. Returns `None` without scheduling anything when the
    /// host has no drawing surface.
    pub fn mount_with<H, R>(host: &mut H, rng: &mut R, config: &StarFieldConfig) -> Option<Self>
    where
        H: Host,
        R: RandomSource + ?Sized,
    {
        let viewport = host.viewport();
        let Some(surface) = host.surface() else {
            log::debug!("star field not mounted: drawing surface unavailable");
            return None;
        };
        surface.set_size(viewport);

        let stars = populate(rng, viewport, config);
        let pending_frame = Some(host.request_frame());
        let resize_listener = Some(host.subscribe_resize());

        log::debug!(
            "star field mounted: {} stars over {}x{}",
            stars.len(),
            viewport.width,
            viewport.height
        );

        Some(Self {
            stars,
            config: config.clone(),
            frame_counter: 0,
            state: LoopState::Running,
            pending_frame,
            resize_listener,
        })
    }

    /// Redraws every star at the current frame counter, then advances it.
    ///
    /// A frame delivered after teardown still draws but schedules nothing.
    pub fn frame<H: Host>(&mut self, host: &mut H) {
        self.pending_frame = None;

        if let Some(surface) = host.surface() {
            surface.clear();
            for star in &self.stars {
                let opacity = star.opacity_with(self.config.twinkle, self.frame_counter);
                surface.fill_circle(
                    star.position(),
                    star.radius(),
                    self.config.color.with_opacity(opacity),
                );
            }
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);

        if self.state == LoopState::Running {
            self.pending_frame = Some(host.request_frame());
        }
    }

    /// Matches the surface to the host viewport. Ignored once stopped.
    pub fn on_resize<H: Host>(&self, host: &mut H) {
        if self.state != LoopState::Running {
            return;
        }
        let viewport = host.viewport();
        if let Some(surface) = host.surface() {
            surface.set_size(viewport);
            log::debug!("star field surface resized to {}x{}", viewport.width, viewport.height);
        }
    }

    /// Stops the loop. Calling it again does nothing.
    pub fn teardown<H: Host>(&mut self, host: &mut H) {
        if self.state == LoopState::Stopped {
            log::debug!("star field already torn down");
            return;
        }
        if let Some(id) = self.pending_frame.take() {
            host.cancel_frame(id);
        }
        if let Some(id) = self.resize_listener.take() {
            host.unsubscribe_resize(id);
        }
        self.state = LoopState::Stopped;
        log::debug!("star field torn down after {} frames", self.frame_counter);
    }

    #[inline]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[inline]
    pub fn config(&self) -> &StarFieldConfig {
        &self.config
    }

    /// Number of frames drawn so far.
    #[inline]
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    #[inline]
    pub fn pending_frame(&self) -> Option<FrameRequestId> {
        self.pending_frame
    }

    #[inline]
    pub fn resize_listener(&self) -> Option<ResizeListenerId> {
        self.resize_listener
    }
}
