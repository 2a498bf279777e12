use anyhow::Result;
use winit::dpi::LogicalSize;
use winit::window::WindowId;

use starfield_engine::core::{App as EngineApp, AppControl, FrameCtx, WindowCtx};
use starfield_engine::device::GpuInit;
use starfield_engine::render::shapes::backdrop::BackdropRenderer;
use starfield_engine::render::shapes::circle::CircleRenderer;
use starfield_engine::window::{Runtime, RuntimeConfig};

use crate::backdrop::Backdrop;
use crate::config::StarFieldConfig;
use crate::host::PixelSize;
use crate::stage::Stage;

// ── Application ───────────────────────────────────────────────────────────

/// Opens a window showing the animated star field.
///
/// ```rust,ignore
/// Application::new()
///     .title("Night sky")
///     .size(1024.0, 768.0)
///     .seed(42)
///     .run()?;
/// ```
pub struct Application {
    title:    String,
    width:    f64,
    height:   f64,
    seed:     Option<u64>,
    config:   StarFieldConfig,
    globe:    bool,
    backdrop: Backdrop,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title:    "starfield".to_string(),
            width:    1280.0,
            height:   720.0,
            seed:     None,
            config:   StarFieldConfig::default(),
            globe:    true,
            backdrop: Backdrop::default(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    /// Seed the star generator for a reproducible sky.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn star_count(mut self, n: usize) -> Self {
        self.config.star_count = n;
        self
    }

    /// Replace the whole star configuration.
    pub fn config(mut self, config: StarFieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Show or hide the rotating globe.
    pub fn globe(mut self, enabled: bool) -> Self {
        self.globe = enabled;
        self
    }

    pub fn backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// Runs the event loop until the window is closed.
    pub fn run(self) -> Result<()> {
        let config = RuntimeConfig {
            title:        self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        };
        log::info!(
            "starting {}x{} window with {} stars",
            self.width,
            self.height,
            self.config.star_count
        );
        Runtime::run(config, GpuInit::default(), StarfieldApp::new(self))
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── StarfieldApp ──────────────────────────────────────────────────────────

/// Engine-side state: the stage plus the GPU renderers that draw it.
struct StarfieldApp {
    stage:    Stage,
    backdrop: Backdrop,

    backdrop_renderer: BackdropRenderer,
    circle_renderer:   CircleRenderer,
}

impl StarfieldApp {
    fn new(app: Application) -> Self {
        Self {
            stage:             Stage::new(app.config, app.seed, app.globe),
            backdrop:          app.backdrop,
            backdrop_renderer: BackdropRenderer::new(),
            circle_renderer:   CircleRenderer::new(),
        }
    }
}

fn viewport_of(window: &WindowCtx<'_>) -> PixelSize {
    let (w, h) = window.logical_size();
    PixelSize::from_logical(w, h)
}

impl EngineApp for StarfieldApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if !self.stage.is_mounted() {
            self.stage.mount(viewport_of(&ctx.window));
        }

        self.stage.redraw();

        // ── Render ────────────────────────────────────────────────────────
        let gradient = self.backdrop.gradient();
        let dl       = self.stage.draw_list_mut();
        let r_b      = &mut self.backdrop_renderer;
        let r_c      = &mut self.circle_renderer;

        ctx.render(self.backdrop.base_color(), |rctx, target| {
            r_b.render(rctx, target, gradient);
            r_c.render(rctx, target, dl);
        })
    }

    fn on_resize(&mut self, window: &WindowCtx<'_>) -> AppControl {
        self.stage.resize(viewport_of(window));
        AppControl::Continue
    }

    fn wants_frame(&self, _window_id: WindowId) -> bool {
        self.stage.wants_frame()
    }

    fn on_close(&mut self, _window_id: WindowId) {
        self.stage.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let app = Application::new();
        assert_eq!(app.title, "starfield");
        assert_eq!((app.width, app.height), (1280.0, 720.0));
        assert!(app.seed.is_none());
        assert!(app.globe);
        assert_eq!(app.config, StarFieldConfig::default());
    }

    #[test]
    fn builder_setters() {
        let app = Application::new()
            .title("sky")
            .size(800.0, 600.0)
            .seed(3)
            .star_count(50)
            .globe(false);
        assert_eq!(app.title, "sky");
        assert_eq!((app.width, app.height), (800.0, 600.0));
        assert_eq!(app.seed, Some(3));
        assert_eq!(app.config.star_count, 50);
        assert!(!app.globe);
    }

    #[test]
    fn app_waits_for_mount_before_asking_for_frames() {
        let state = StarfieldApp::new(Application::new().seed(1));
        assert!(!state.stage.wants_frame());
    }
}
