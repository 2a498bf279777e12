//! Shared GPU types and utilities used by the shape renderers.

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::paint::Paint;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

pub(super) fn triangle_list() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport) -> Self {
        let v = viewport.clamped();
        Self {
            viewport: [v.width, v.height],
            _pad: [0.0; 2],
        }
    }
}

/// Minimum binding size for a uniform of type `T`.
///
/// Every uniform in this module is a non-empty `#[repr(C)]` struct.
pub(super) fn ubo_min_binding_size<T>() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── paint resolution ──────────────────────────────────────────────────────

/// A `Paint` reduced to what the gradient-capable shaders consume.
///
/// Colors are premultiplied sRGB (see [`crate::paint::Color::to_srgb_premul`]); shaders blend
/// them there and decode to linear afterwards. `stops` holds the clamped
/// offsets of `color0`, `color_mid` and `color1` along the axis, then padding.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct ResolvedPaint {
    pub color0: [f32; 4],
    pub color_mid: [f32; 4],
    pub color1: [f32; 4],
    pub grad_p0: [f32; 2],
    pub grad_p1: [f32; 2],
    pub stops: [f32; 4],
}

impl ResolvedPaint {
    fn uniform(color: [f32; 4]) -> Self {
        Self {
            color0: color,
            color_mid: color,
            color1: color,
            grad_p0: [0.0, 0.0],
            grad_p1: [0.0, 0.0],
            stops: [0.0, 0.5, 1.0, 0.0],
        }
    }
}

/// Converts a `Paint` for the gradient-capable shaders.
///
/// Solid fills produce identical colors and a degenerate (zero-length) gradient
/// axis, so the shader falls back to `color0` as a uniform fill.
///
/// Linear gradients keep up to three stops. Two stops get a synthesized midpoint
/// halfway between them; more than three keep the first, middle and last and
/// emit a one-time debug message.
pub(super) fn resolve_paint(paint: &Paint, warned_multi_stop: &mut bool) -> ResolvedPaint {
    let g = match paint {
        Paint::Solid(c) => return ResolvedPaint::uniform(c.to_srgb_premul()),
        Paint::LinearGradient(g) => g,
    };

    let n = g.stops.len();
    let (Some(first), Some(last)) = (g.stops.first(), g.stops.last()) else {
        return ResolvedPaint::uniform([0.0; 4]);
    };
    if n < 2 {
        return ResolvedPaint::uniform(first.color.to_srgb_premul());
    }
    if n > 3 && !*warned_multi_stop {
        log::debug!("circle gradient has {n} stops; only first, middle and last are used");
        *warned_multi_stop = true;
    }

    let color0 = first.color.to_srgb_premul();
    let color1 = last.color.to_srgb_premul();
    let t0 = first.t.clamp(0.0, 1.0);
    let t1 = last.t.clamp(t0, 1.0);

    let (color_mid, t_mid) = if n == 2 {
        let mid = std::array::from_fn(|i| (color0[i] + color1[i]) * 0.5);
        (mid, (t0 + t1) * 0.5)
    } else {
        let mid = g.stops[n / 2];
        (mid.color.to_srgb_premul(), mid.t.clamp(t0, t1))
    };

    ResolvedPaint {
        color0,
        color_mid,
        color1,
        grad_p0: [g.start.x, g.start.y],
        grad_p1: [g.end.x, g.end.y],
        stops: [t0, t_mid, t1, 0.0],
    }
}
