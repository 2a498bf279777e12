use starfield_engine::coords::Vec2;
use starfield_engine::paint::{Color, LinearGradient, Paint};
use starfield_engine::scene::{DrawList, ZIndex};

use crate::host::PixelSize;

/// Layer the globe is recorded on, above the stars.
pub const GLOBE_LAYER: ZIndex = ZIndex(1);

/// Degrees of spin per frame.
pub const DEGREES_PER_FRAME: f32 = 0.5;

/// Preferred globe radius in logical pixels.
pub const GLOBE_RADIUS: f32 = 128.0;

/// Smallest radius worth drawing.
const MIN_RADIUS: f32 = 8.0;

/// Orbital rings as `(outset, white alpha)`.
pub const RINGS: [(f32, f32); 2] = [(32.0, 0.2), (64.0, 0.1)];

const RING_WIDTH: f32 = 1.0;

/// Land mass anchored on the disc.
///
/// `anchor` is a fraction of the disc's bounding box, `size` a fraction of its
/// diameter.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Continent {
    anchor: Vec2,
    size: f32,
    alpha: f32,
}

const CONTINENTS: [Continent; 4] = [
    Continent { anchor: Vec2::new(0.3, 0.4), size: 0.20, alpha: 0.8 },
    Continent { anchor: Vec2::new(0.7, 0.2), size: 0.15, alpha: 0.6 },
    Continent { anchor: Vec2::new(0.2, 0.8), size: 0.25, alpha: 0.7 },
    Continent { anchor: Vec2::new(0.8, 0.7), size: 0.18, alpha: 0.5 },
];

const LAND: u32 = 0x22C55E;
const OCEAN: [u32; 3] = [0x3B82F6, 0x22C55E, 0x1D4ED8];
const GLOW: u32 = 0x3B82F6;

/// A continent projected for the current rotation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Landmark {
    pub center: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Spinning globe with two orbital rings.
///
/// The disc itself is static; continents ride around the vertical axis and
/// disappear while on the far side.
#[derive(Debug, Clone, PartialEq)]
pub struct Globe {
    rotation: f32,
    step: f32,
}

impl Default for Globe {
    fn default() -> Self {
        Self::new()
    }
}

impl Globe {
    pub fn new() -> Self {
        Self { rotation: 0.0, step: DEGREES_PER_FRAME }
    }

    /// Current rotation in degrees, in `[0, 360)`.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Advances one frame.
    pub fn advance(&mut self) {
        self.rotation = (self.rotation + self.step).rem_euclid(360.0);
    }

    /// Centers the globe in `viewport`, shrinking it so the outer ring fits.
    ///
    /// Returns `None` when the viewport is too small to show anything.
    pub fn fit(viewport: PixelSize) -> Option<(Vec2, f32)> {
        let (w, h) = (viewport.width as f32, viewport.height as f32);
        let outer = RINGS[RINGS.len() - 1].0 + RING_WIDTH;
        let radius = GLOBE_RADIUS.min(w.min(h) * 0.5 - outer);
        if radius < MIN_RADIUS {
            return None;
        }
        Some((Vec2::new(w * 0.5, h * 0.5), radius))
    }

    /// Continents on the visible hemisphere, back to front.
    pub fn landmarks(&self, center: Vec2, radius: f32) -> Vec<Landmark> {
        let (sin, cos) = self.rotation.to_radians().sin_cos();

        let mut out: Vec<(f32, Landmark)> = CONTINENTS
            .iter()
            .filter_map(|c| {
                let x = c.anchor.x * 2.0 - 1.0;
                let y = c.anchor.y * 2.0 - 1.0;
                let z = (1.0 - x * x - y * y).max(0.0).sqrt();

                let xr = x * cos + z * sin;
                let zr = z * cos - x * sin;
                if zr <= 0.0 {
                    return None;
                }

                let mark = Landmark {
                    center: center + Vec2::new(xr, y) * radius,
                    radius: c.size * radius * 2.0 * zr,
                    alpha: c.alpha,
                };
                Some((zr, mark))
            })
            .collect();

        out.sort_by(|a, b| a.0.total_cmp(&b.0));
        out.into_iter().map(|(_, m)| m).collect()
    }

    /// Records glow, disc, continents and rings at [`GLOBE_LAYER`].
    pub fn paint(&self, draw_list: &mut DrawList, center: Vec2, radius: f32) {
        let z = GLOBE_LAYER;

        draw_list.push_solid_circle(
            z,
            center,
            radius * 1.12,
            Color::from_hex(GLOW).with_opacity(0.25),
        );

        let half = Vec2::new(radius, 0.0);
        let ocean = LinearGradient::evenly_spaced(
            center - half,
            center + half,
            &OCEAN.map(Color::from_hex),
        );
        draw_list.push_circle(z, center, radius, Paint::LinearGradient(ocean), None);

        let land = Color::from_hex(LAND);
        for mark in self.landmarks(center, radius) {
            draw_list.push_solid_circle(z, mark.center, mark.radius, land.with_opacity(mark.alpha));
        }

        for (outset, alpha) in RINGS {
            draw_list.push_ring(
                z,
                center,
                radius + outset,
                RING_WIDTH,
                Color::white().with_opacity(alpha),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfield_engine::scene::DrawCmd;

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn advances_half_a_degree_per_frame() {
        let mut g = Globe::new();
        g.advance();
        assert_eq!(g.rotation(), 0.5);
        g.advance();
        assert_eq!(g.rotation(), 1.0);
    }

    #[test]
    fn rotation_wraps_below_360() {
        let mut g = Globe::new();
        for _ in 0..719 {
            g.advance();
        }
        assert_eq!(g.rotation(), 359.5);
        g.advance();
        assert_eq!(g.rotation(), 0.0);
        for _ in 0..10_000 {
            g.advance();
            assert!((0.0..360.0).contains(&g.rotation()));
        }
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn fit_centers_and_caps_radius() {
        let (c, r) = Globe::fit(PixelSize::new(1280, 720)).unwrap();
        assert_eq!(c, Vec2::new(640.0, 360.0));
        assert_eq!(r, GLOBE_RADIUS);
    }

    #[test]
    fn fit_shrinks_to_keep_rings_inside() {
        let (_, r) = Globe::fit(PixelSize::new(400, 300)).unwrap();
        assert!(r + 65.0 <= 150.0);
        assert!(Globe::fit(PixelSize::new(100, 100)).is_none());
    }

    // ── continents ────────────────────────────────────────────────────────

    #[test]
    fn all_continents_face_the_viewer_at_rest() {
        let g = Globe::new();
        let marks = g.landmarks(Vec2::zero(), 100.0);
        assert_eq!(marks.len(), 4);
        for m in &marks {
            assert!(m.radius > 0.0);
            assert!(m.center.x.hypot(m.center.y) < 100.0);
        }
    }

    #[test]
    fn far_side_continents_are_hidden() {
        let mut g = Globe::new();
        for _ in 0..360 {
            g.advance();
        }
        assert_eq!(g.rotation(), 180.0);
        assert!(g.landmarks(Vec2::zero(), 100.0).is_empty());
    }

    #[test]
    fn quarter_turn_shows_only_the_western_half() {
        let mut g = Globe::new();
        for _ in 0..180 {
            g.advance();
        }
        assert_eq!(g.rotation(), 90.0);
        // anchors left of the meridian rotate to the front
        assert_eq!(g.landmarks(Vec2::zero(), 100.0).len(), 2);
    }

    // ── painting ──────────────────────────────────────────────────────────

    #[test]
    fn paint_records_disc_continents_and_rings() {
        let g = Globe::new();
        let mut dl = DrawList::new();
        g.paint(&mut dl, Vec2::new(200.0, 200.0), 100.0);

        // glow + disc + 4 continents + 2 rings
        assert_eq!(dl.len(), 8);
        assert!(dl.items().iter().all(|i| i.key.z == GLOBE_LAYER));

        let radii: Vec<f32> = dl
            .items()
            .iter()
            .map(|i| {
                let DrawCmd::Circle(c) = &i.cmd;
                c.radius
            })
            .collect();
        assert_eq!(radii[1], 100.0);
        assert_eq!(radii[6], 132.0);
        assert_eq!(radii[7], 164.0);

        let DrawCmd::Circle(disc) = &dl.items()[1].cmd;
        let Paint::LinearGradient(ocean) = &disc.paint else {
            panic!("disc should be a gradient");
        };
        let colors: Vec<Color> = ocean.stops.iter().map(|s| s.color).collect();
        assert_eq!(colors, OCEAN.map(Color::from_hex).to_vec());
        assert_eq!((ocean.start.x, ocean.end.x), (100.0, 300.0));

        let DrawCmd::Circle(ring) = &dl.items()[7].cmd;
        assert!(ring.paint.is_invisible());
        assert!(ring.border.is_some());
    }
}
