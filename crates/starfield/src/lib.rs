//! Twinkling star field backdrop on top of `starfield-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! starfield::Application::new()
//!     .title("Night sky")
//!     .seed(42)
//!     .run()?;
//! ```
//!
//! # Driving a field yourself
//!
//! The effect only talks to its environment through the [`host`] traits, so it
//! can run on any surface and scheduler:
//!
//! ```rust,ignore
//! use starfield::prelude::*;
//!
//! let mut field = StarField::mount(&mut my_host, &mut rand::rng()).unwrap();
//! // whenever a requested frame comes due:
//! field.frame(&mut my_host);
//! // on viewport change:
//! field.on_resize(&mut my_host);
//! // when done:
//! field.teardown(&mut my_host);
//! ```

pub mod app;
pub mod backdrop;
pub mod config;
pub mod field;
pub mod globe;
pub mod host;
pub mod random;
pub mod stage;
pub mod star;
pub mod surface;

pub use app::Application;

pub mod prelude {
    pub use crate::backdrop::Backdrop;
    pub use crate::config::StarFieldConfig;
    pub use crate::field::{LoopState, StarField};
    pub use crate::globe::Globe;
    pub use crate::host::{
        DrawSurface, FrameQueue, FrameRequestId, FrameScheduler, Host, PixelSize,
        ResizeListenerId, ResizeListeners, ResizeSource,
    };
    pub use crate::random::RandomSource;
    pub use crate::star::{Star, Twinkle};
    pub use crate::surface::SceneSurface;
}
