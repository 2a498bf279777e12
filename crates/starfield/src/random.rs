/// Uniform random draws for star generation.
///
/// Every `rand` generator is a source; tests substitute scripted sequences.
pub trait RandomSource {
    /// Returns a value in `[0, 1)`.
    fn next_unit(&mut self) -> f32;
}

impl<R: rand::RngCore + ?Sized> RandomSource for R {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        rand::Rng::random::<f32>(self)
    }
}

/// Maps a unit draw into `[lo, hi)`.
///
/// A draw just below 1 can round up to `hi`; that case is pulled back inside.
pub(crate) fn sample_range<R: RandomSource + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    let v = lo + rng.next_unit() * (hi - lo);
    if v < hi || hi <= lo { v } else { hi - (hi - lo) * f32::EPSILON }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn std_rng_draws_are_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    struct Fixed(f32);

    impl RandomSource for Fixed {
        fn next_unit(&mut self) -> f32 {
            self.0
        }
    }

    #[test]
    fn largest_unit_draw_stays_below_hi() {
        let top = 1.0 - f32::EPSILON / 2.0;
        assert!(sample_range(&mut Fixed(top), 0.5, 2.5) < 2.5);
        assert!(sample_range(&mut Fixed(top), 0.0, 800.0) < 800.0);
        assert_eq!(sample_range(&mut Fixed(0.0), 0.2, 1.0), 0.2);
    }

    #[test]
    fn sample_range_stays_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let v = sample_range(&mut rng, 0.5, 2.5);
            assert!((0.5..2.5).contains(&v));
        }
    }
}
