/// Viewport size in logical pixels.
///
/// Renderers should treat this as the coordinate basis for converting logical px
/// positions to NDC in shaders.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the size clamped to at least one pixel on each axis.
    ///
    /// Shaders divide by the viewport; a minimized window reports 0x0.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(self.width.max(1.0), self.height.max(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_never_below_one_pixel() {
        assert_eq!(Viewport::new(0.0, 0.0).clamped(), Viewport::new(1.0, 1.0));
        assert_eq!(Viewport::new(640.0, 0.5).clamped(), Viewport::new(640.0, 1.0));
    }
}
