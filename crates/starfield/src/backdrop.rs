use starfield_engine::coords::Vec2;
use starfield_engine::paint::{Color, LinearGradient};

/// Top, middle and bottom colors of the default night sky.
pub const NIGHT_SKY: [u32; 3] = [0x0F172A, 0x1E1B4B, 0x312E81];

/// Static vertical gradient painted under the stars.
///
/// Not animated: it is drawn by its own renderer each frame and never touched by
/// the star field.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    gradient: LinearGradient,
}

impl Backdrop {
    /// Evenly spaced stops, top to bottom.
    pub fn from_colors(colors: &[Color]) -> Self {
        Self {
            gradient: LinearGradient::evenly_spaced(Vec2::zero(), Vec2::new(0.0, 1.0), colors),
        }
    }

    #[inline]
    pub fn gradient(&self) -> &LinearGradient {
        &self.gradient
    }

    /// Color at normalized height `t` (0 = top).
    pub fn color_at(&self, t: f32) -> Color {
        self.gradient.sample(t)
    }

    /// Clear color for the frame: the top stop.
    pub fn base_color(&self) -> Color {
        self.gradient.stops.first().map(|s| s.color).unwrap_or_default()
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::from_colors(&NIGHT_SKY.map(Color::from_hex))
    }
}
