use crate::coords::Vec2;

use super::Color;

/// A single gradient stop.
///
/// `t` is expected in [0, 1]. Renderers clamp out-of-range offsets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient definition in logical pixel space.
///
/// Semantics:
/// - `start` and `end` are positions in the same coordinate space as geometry.
/// - Stops define premultiplied linear colors, ordered by `t`.
/// - Between stops, colors blend in premultiplied sRGB, as CSS gradients do.
/// - Outside `[start, end]` the edge stops are extended (pad).
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>) -> Self {
        Self { start, end, stops }
    }

    /// Builds a gradient whose stops are spread evenly over `[0, 1]`.
    pub fn evenly_spaced(start: Vec2, end: Vec2, colors: &[Color]) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f32;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &c)| ColorStop::new(i as f32 / last, c))
            .collect();
        Self::new(start, end, stops)
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && self.stops.windows(2).all(|w| w[0].t <= w[1].t)
            && (self.end.x != self.start.x || self.end.y != self.start.y)
    }

    /// Evaluates the gradient at parameter `t` (pad spread).
    ///
    /// CPU reference for the backdrop shader; also used by tests.
    pub fn sample(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::transparent();
        };
        if t <= first.t {
            return first.color;
        }
        for w in self.stops.windows(2) {
            let (a, b) = (w[0], w[1]);
            if t <= b.t {
                let span = (b.t - a.t).max(1e-5);
                let k = ((t - a.t) / span).clamp(0.0, 1.0);
                return mix_srgb(a.color, b.color, k);
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

fn mix_srgb(a: Color, b: Color, k: f32) -> Color {
    if k <= 0.0 {
        return a;
    }
    if k >= 1.0 {
        return b;
    }
    let (a, b) = (a.to_srgb_premul(), b.to_srgb_premul());
    Color::from_srgb_premul(std::array::from_fn(|i| a[i] + (b[i] - a[i]) * k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical(colors: &[Color]) -> LinearGradient {
        LinearGradient::evenly_spaced(Vec2::zero(), Vec2::new(0.0, 100.0), colors)
    }

    #[test]
    fn evenly_spaced_three_stops() {
        let g = vertical(&[Color::transparent(), Color::white(), Color::transparent()]);
        let ts: Vec<f32> = g.stops.iter().map(|s| s.t).collect();
        assert_eq!(ts, vec![0.0, 0.5, 1.0]);
        assert!(g.is_valid());
    }

    #[test]
    fn single_stop_is_invalid() {
        assert!(!vertical(&[Color::white()]).is_valid());
    }

    #[test]
    fn zero_length_axis_is_invalid() {
        let g = LinearGradient::evenly_spaced(
            Vec2::new(5.0, 5.0),
            Vec2::new(5.0, 5.0),
            &[Color::white(), Color::transparent()],
        );
        assert!(!g.is_valid());
    }

    #[test]
    fn unsorted_stops_are_invalid() {
        let g = LinearGradient::new(
            Vec2::zero(),
            Vec2::new(0.0, 1.0),
            vec![ColorStop::new(0.8, Color::white()), ColorStop::new(0.2, Color::white())],
        );
        assert!(!g.is_valid());
    }

    #[test]
    fn sample_pads_and_interpolates() {
        let g = vertical(&[Color::transparent(), Color::white()]);
        assert_eq!(g.sample(-1.0), Color::transparent());
        assert_eq!(g.sample(2.0), Color::white());
        assert_eq!(g.sample(0.5).a, 0.5);
    }

    #[test]
    fn sample_blends_in_srgb() {
        let g = vertical(&[Color::from_hex(0x000000), Color::from_hex(0xFFFFFF)]);
        let mid = g.sample(0.5);
        let expected = Color::from_srgb(0.5, 0.5, 0.5, 1.0);
        assert!((mid.r - expected.r).abs() < 1e-5);
        // a linear blend would land on 0.5
        assert!(mid.r < 0.25);
    }

    #[test]
    fn sample_hits_middle_stop_exactly() {
        let mid = Color::from_premul(0.2, 0.1, 0.3, 1.0);
        let g = vertical(&[Color::transparent(), mid, Color::white()]);
        assert_eq!(g.sample(0.5), mid);
    }
}
