/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a` (premultiplied alpha).
///
/// Surfaces are configured with an sRGB format, so colors are stored linear and
/// the GPU encodes on write. Constructors taking sRGB input decode first.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates an opaque color from a `0xRRGGBB` sRGB literal.
    ///
    /// ```
    /// use starfield_engine::paint::Color;
    /// let navy = Color::from_hex(0x0F172A);
    /// assert_eq!(navy.a, 1.0);
    /// ```
    #[inline]
    pub fn from_hex(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xFF) as u8;
        let g = ((rgb >> 8) & 0xFF) as u8;
        let b = (rgb & 0xFF) as u8;
        Self::from_srgb_u8(r, g, b, 255)
    }

    /// Creates a premultiplied color from straight sRGB `f32` components in `[0, 1]`.
    ///
    /// RGB is decoded to linear; alpha is already linear.
    #[inline]
    pub fn from_srgb(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::from_straight(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a)
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha linear components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Returns this color with its alpha multiplied by `opacity`.
    ///
    /// Premultiplied channels scale together, so the hue is preserved.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let k = opacity.clamp(0.0, 1.0);
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
            a: self.a * k,
        }
    }

    /// Returns sRGB-encoded RGB premultiplied by alpha, the space CSS
    /// gradients interpolate in.
    ///
    /// For `a == 0`, every component is 0.
    #[inline]
    pub fn to_srgb_premul(self) -> [f32; 4] {
        if self.a <= 0.0 {
            return [0.0; 4];
        }
        let inv = 1.0 / self.a;
        [
            linear_to_srgb(self.r * inv) * self.a,
            linear_to_srgb(self.g * inv) * self.a,
            linear_to_srgb(self.b * inv) * self.a,
            self.a,
        ]
    }

    /// Inverse of [`Color::to_srgb_premul`].
    #[inline]
    pub fn from_srgb_premul([r, g, b, a]: [f32; 4]) -> Self {
        if a <= 0.0 {
            return Self::transparent();
        }
        Self::from_srgb(r / a, g / a, b / a, a)
    }
    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// sRGB electro-optical transfer function (decode to linear).
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB opto-electronic transfer function (encode from linear).
#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn srgb_endpoints_are_fixed() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!(close(srgb_to_linear(1.0), 1.0));
    }

    #[test]
    fn srgb_midtone_is_darker_in_linear() {
        // 0x80 is roughly 0.216 linear.
        let c = Color::from_srgb_u8(0x80, 0x80, 0x80, 255);
        assert!(close(c.r, 0.215_861));
    }

    #[test]
    fn from_hex_splits_channels() {
        let c = Color::from_hex(0xFF0000);
        assert!(close(c.r, 1.0));
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn straight_is_premultiplied() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.0, 0.5));
    }

    #[test]
    fn with_opacity_scales_all_channels() {
        let c = Color::white().with_opacity(0.35);
        assert!(close(c.r, 0.35));
        assert!(close(c.a, 0.35));
        assert!(close(c.r / c.a, 1.0));
    }

    #[test]
    fn srgb_premul_recovers_hex_bytes() {
        let [r, g, b, a] = Color::from_hex(0x1E1B4B).to_srgb_premul();
        assert!((r - 0x1E as f32 / 255.0).abs() < 1e-4);
        assert!((g - 0x1B as f32 / 255.0).abs() < 1e-4);
        assert!((b - 0x4B as f32 / 255.0).abs() < 1e-4);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn srgb_premul_scales_with_alpha() {
        let [r, _, _, a] = Color::white().with_opacity(0.5).to_srgb_premul();
        assert!(close(r, 0.5));
        assert!(close(a, 0.5));
        assert_eq!(Color::transparent().to_srgb_premul(), [0.0; 4]);
    }

    #[test]
    fn srgb_premul_round_trips() {
        let c = Color::from_hex(0x22C55E).with_opacity(0.7);
        let back = Color::from_srgb_premul(c.to_srgb_premul());
        assert!(close(back.r, c.r) && close(back.g, c.g) && close(back.b, c.b));
        assert!(close(back.a, c.a));
        assert_eq!(Color::from_srgb_premul([0.0; 4]), Color::transparent());
    }

    #[test]
    fn with_opacity_clamps() {
        assert_eq!(Color::white().with_opacity(2.0), Color::white());
        assert_eq!(Color::white().with_opacity(-1.0), Color::transparent());
    }
}
