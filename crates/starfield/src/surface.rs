use starfield_engine::coords::Vec2;
use starfield_engine::paint::Color;
use starfield_engine::scene::{DrawList, ZIndex};

use crate::host::{DrawSurface, PixelSize};

/// Layer the star circles are recorded on.
pub const STAR_LAYER: ZIndex = ZIndex(0);

/// `DrawSurface` that records into an engine [`DrawList`].
///
/// Clearing drops only the star layer; anything recorded on other layers (the
/// globe) is left for its owner to manage.
#[derive(Debug, Default)]
pub struct SceneSurface {
    size: PixelSize,
    draw_list: DrawList,
}

impl SceneSurface {
    pub fn new(size: PixelSize) -> Self {
        Self { size, draw_list: DrawList::new() }
    }

    #[inline]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    #[inline]
    pub fn draw_list_mut(&mut self) -> &mut DrawList {
        &mut self.draw_list
    }
}

impl DrawSurface for SceneSurface {
    #[inline]
    fn size(&self) -> PixelSize {
        self.size
    }

    #[inline]
    fn set_size(&mut self, size: PixelSize) {
        self.size = size;
    }

    fn clear(&mut self) {
        self.draw_list.clear_layer(STAR_LAYER);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.draw_list.push_solid_circle(STAR_LAYER, center, radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfield_engine::scene::DrawCmd;

    #[test]
    fn circles_land_on_the_star_layer() {
        let mut s = SceneSurface::new(PixelSize::new(10, 10));
        s.fill_circle(Vec2::new(1.0, 2.0), 1.5, Color::white().with_opacity(0.5));

        let item = &s.draw_list().items()[0];
        assert_eq!(item.key.z, STAR_LAYER);
        let DrawCmd::Circle(c) = &item.cmd;
        assert_eq!(c.center, Vec2::new(1.0, 2.0));
        assert_eq!(c.radius, 1.5);
    }

    #[test]
    fn clear_keeps_other_layers() {
        let mut s = SceneSurface::default();
        s.fill_circle(Vec2::zero(), 1.0, Color::white());
        s.draw_list_mut()
            .push_solid_circle(STAR_LAYER.above(), Vec2::zero(), 9.0, Color::white());

        s.clear();
        assert_eq!(s.draw_list().len(), 1);
        assert_eq!(s.draw_list().items()[0].key.z, STAR_LAYER.above());
    }

    #[test]
    fn size_is_tracked() {
        let mut s = SceneSurface::new(PixelSize::new(800, 600));
        s.set_size(PixelSize::new(400, 300));
        assert_eq!(s.size(), PixelSize::new(400, 300));
    }
}
