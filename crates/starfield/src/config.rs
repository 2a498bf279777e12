use std::ops::Range;

use starfield_engine::paint::Color;

use crate::star::Twinkle;

/// Population size used when nothing else is configured.
pub const DEFAULT_STAR_COUNT: usize = 200;

/// Star field tuning.
///
/// `Default` gives the classic look: 200 white stars, radius `[0.5, 2.5)`,
/// base opacity `[0.2, 1.0)`, twinkle rate `[0.01, 0.03)` rad/frame and a
/// twinkle factor of `sin(f * rate) * 0.3 + 0.7`.
#[derive(Debug, Clone, PartialEq)]
pub struct StarFieldConfig {
    pub star_count: usize,
    pub radius: Range<f32>,
    pub base_opacity: Range<f32>,
    pub twinkle_rate: Range<f32>,
    pub twinkle: Twinkle,
    pub color: Color,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            star_count: DEFAULT_STAR_COUNT,
            radius: 0.5..2.5,
            base_opacity: 0.2..1.0,
            twinkle_rate: 0.01..0.03,
            twinkle: Twinkle::default(),
            color: Color::white(),
        }
    }
}

impl StarFieldConfig {
    pub fn with_star_count(mut self, star_count: usize) -> Self {
        self.star_count = star_count;
        self
    }
}
