use starfield_engine::coords::Vec2;

use crate::config::StarFieldConfig;
use crate::host::PixelSize;
use crate::random::{sample_range, RandomSource};

/// Brightness oscillator shared by every star: `sin(f * rate) * amplitude + midpoint`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Twinkle {
    pub amplitude: f32,
    pub midpoint: f32,
}

impl Default for Twinkle {
    fn default() -> Self {
        Self { amplitude: 0.3, midpoint: 0.7 }
    }
}

impl Twinkle {
    /// Factor for a star oscillating at `rate` radians per frame, at frame `frame`.
    ///
    /// The phase is computed in `f64` so long sessions keep full precision.
    pub fn factor(self, frame: u64, rate: f32) -> f32 {
        let phase = frame as f64 * rate as f64;
        (phase.sin() * self.amplitude as f64 + self.midpoint as f64) as f32
    }
}

/// A single point light. Attributes are fixed at creation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Star {
    x: f32,
    y: f32,
    radius: f32,
    base_opacity: f32,
    twinkle_rate: f32,
}

impl Star {
    pub fn new(x: f32, y: f32, radius: f32, base_opacity: f32, twinkle_rate: f32) -> Self {
        Self { x, y, radius, base_opacity, twinkle_rate }
    }

    /// Samples a star inside `viewport`.
    ///
    /// Draws are consumed as x, y, radius, base opacity, twinkle rate.
    pub fn random<R>(rng: &mut R, viewport: PixelSize, config: &StarFieldConfig) -> Self
    where
        R: RandomSource + ?Sized,
    {
        let x = sample_range(rng, 0.0, viewport.width as f32);
        let y = sample_range(rng, 0.0, viewport.height as f32);
        let radius = sample_range(rng, config.radius.start, config.radius.end);
        let base_opacity = sample_range(rng, config.base_opacity.start, config.base_opacity.end);
        let twinkle_rate = sample_range(rng, config.twinkle_rate.start, config.twinkle_rate.end);
        Self::new(x, y, radius, base_opacity, twinkle_rate)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn base_opacity(&self) -> f32 {
        self.base_opacity
    }

    /// Radians per frame.
    #[inline]
    pub fn twinkle_rate(&self) -> f32 {
        self.twinkle_rate
    }

    /// Rendered opacity at `frame` with the default oscillator.
    #[inline]
    pub fn opacity_at(&self, frame: u64) -> f32 {
        self.opacity_with(Twinkle::default(), frame)
    }

    pub fn opacity_with(&self, twinkle: Twinkle, frame: u64) -> f32 {
        self.base_opacity * twinkle.factor(frame, self.twinkle_rate)
    }
}

/// Generates `config.star_count` stars over `viewport`.
pub fn populate<R>(rng: &mut R, viewport: PixelSize, config: &StarFieldConfig) -> Vec<Star>
where
    R: RandomSource + ?Sized,
{
    (0..config.star_count).map(|_| Star::random(rng, viewport, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Script(Vec<f32>, usize);

    impl RandomSource for Script {
        fn next_unit(&mut self) -> f32 {
            let v = self.0[self.1 % self.0.len()];
            self.1 += 1;
            v
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    // ── twinkle ───────────────────────────────────────────────────────────

    #[test]
    fn opacity_at_first_frames() {
        let s = Star::new(0.0, 0.0, 1.0, 0.5, 0.02);
        assert!(close(s.opacity_at(0), 0.35));
        assert!(close(s.opacity_at(1), 0.353));
    }

    #[test]
    fn twinkle_factor_stays_in_band() {
        let t = Twinkle::default();
        for rate in [0.01f32, 0.017, 0.029_999] {
            for frame in (0..5_000u64).chain([u32::MAX as u64, u64::MAX / 3]) {
                let f = t.factor(frame, rate);
                assert!((0.4 - 1e-6..=1.0 + 1e-6).contains(&f), "{f} at {frame}");
            }
        }
    }

    #[test]
    fn opacity_never_exceeds_base() {
        let s = Star::new(0.0, 0.0, 1.0, 0.8, 0.013);
        for frame in 0..2_000 {
            let o = s.opacity_at(frame);
            assert!(o >= 0.0 && o <= s.base_opacity() + 1e-6);
        }
    }

    #[test]
    fn custom_oscillator_is_used() {
        let s = Star::new(0.0, 0.0, 1.0, 1.0, 0.02);
        let flat = Twinkle { amplitude: 0.0, midpoint: 0.5 };
        assert!(close(s.opacity_with(flat, 123), 0.5));
    }

    // ── generation ────────────────────────────────────────────────────────

    #[test]
    fn draws_are_consumed_in_attribute_order() {
        let mut rng = Script(vec![0.5, 0.25, 0.0, 0.5, 0.5], 0);
        let s = Star::random(&mut rng, PixelSize::new(800, 600), &StarFieldConfig::default());
        assert_eq!(s.x(), 400.0);
        assert_eq!(s.y(), 150.0);
        assert_eq!(s.radius(), 0.5);
        assert!(close(s.base_opacity(), 0.6));
        assert!(close(s.twinkle_rate(), 0.02));
    }

    #[test]
    fn populated_stars_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let cfg = StarFieldConfig::default();
        let stars = populate(&mut rng, PixelSize::new(800, 600), &cfg);

        assert_eq!(stars.len(), 200);
        for s in &stars {
            assert!((0.0..800.0).contains(&s.x()));
            assert!((0.0..600.0).contains(&s.y()));
            assert!((0.5..2.5).contains(&s.radius()));
            assert!((0.2..1.0).contains(&s.base_opacity()));
            assert!((0.01..0.03).contains(&s.twinkle_rate()));
        }
    }

    #[test]
    fn empty_viewport_puts_stars_at_origin() {
        let mut rng = StdRng::seed_from_u64(5);
        let stars = populate(&mut rng, PixelSize::new(0, 0), &StarFieldConfig::default());
        assert!(stars.iter().all(|s| s.x() == 0.0 && s.y() == 0.0));
    }
}
