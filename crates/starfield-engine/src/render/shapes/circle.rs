use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::circle::CircleCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    premul_alpha_blend, resolve_paint, triangle_list, ubo_min_binding_size, QuadVertex,
    ViewportUniform, QUAD_INDICES, QUAD_VERTICES,
};

/// Renderer for `DrawCmd::Circle`.
///
/// Supported paints:
/// - `Paint::Solid`
/// - `Paint::LinearGradient` (up to 3 stops; longer gradients keep first, middle and last)
///
/// Borders are rendered as an AA ring on the inner edge of the radius, so a
/// transparent fill with a border draws an outline.
///
/// All circles go out in one instanced draw, in paint order.
#[derive(Default)]
pub struct CircleRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    /// Reused across frames to avoid per-frame allocation.
    scratch: Vec<CircleInstance>,

    warned_multi_stop: bool,
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.scratch.clear();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Circle(cmd) = &item.cmd;
            if let Some(inst) = CircleInstance::from_cmd(cmd, &mut self.warned_multi_stop) {
                self.scratch.push(inst);
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.write_viewport_uniform(ctx);
        self.ensure_instance_capacity(ctx, self.scratch.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.scratch));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.begin_load_pass("starfield circle pass");

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.scratch.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("starfield circle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/circle.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("starfield circle bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: ubo_min_binding_size::<ViewportUniform>(),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("starfield circle pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("starfield circle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), CircleInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: triangle_list(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("starfield circle viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("starfield circle bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("starfield circle quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("starfield circle quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
    }

    /// Grows the instance buffer to the next power of two; 256 covers the default
    /// star population plus the globe without a reallocation.
    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(256);
        let new_size = (new_cap * std::mem::size_of::<CircleInstance>()) as u64;
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("starfield circle instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (112 bytes):
///
///  offset  0  center      [f32; 2]   loc 1
///  offset  8  radius_bw   [f32; 2]   loc 2  (.x = radius, .y = border_width)
///  offset 16  color0      [f32; 4]   loc 3
///  offset 32  color_mid   [f32; 4]   loc 4
///  offset 48  color1      [f32; 4]   loc 5
///  offset 64  grad_p0     [f32; 2]   loc 6
///  offset 72  grad_p1     [f32; 2]   loc 7
///  offset 80  stops       [f32; 4]   loc 8  (offsets of color0, color_mid, color1)
///  offset 96  border_color[f32; 4]   loc 9
///
/// Fill colors are premultiplied sRGB; `border_color` is premultiplied linear.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_bw: [f32; 2],
    color0: [f32; 4],
    color_mid: [f32; 4],
    color1: [f32; 4],
    grad_p0: [f32; 2],
    grad_p1: [f32; 2],
    stops: [f32; 4],
    border_color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 9] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_bw
        3 => Float32x4, // color0
        4 => Float32x4, // color_mid
        5 => Float32x4, // color1
        6 => Float32x2, // grad_p0
        7 => Float32x2, // grad_p1
        8 => Float32x4, // stops
        9 => Float32x4  // border_color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` for circles that would draw nothing.
    fn from_cmd(cmd: &CircleCmd, warned_multi_stop: &mut bool) -> Option<Self> {
        if cmd.radius <= 0.0 || !cmd.center.is_finite() {
            return None;
        }
        if cmd.paint.is_invisible() && cmd.border.is_none() {
            return None;
        }

        let paint = resolve_paint(&cmd.paint, warned_multi_stop);
        let (border_width, border_color) = match &cmd.border {
            Some(b) => (b.width.clamp(0.0, cmd.radius), b.color.to_array()),
            None => (0.0, [0.0f32; 4]),
        };

        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius_bw: [cmd.radius, border_width],
            color0: paint.color0,
            color_mid: paint.color_mid,
            color1: paint.color1,
            grad_p0: paint.grad_p0,
            grad_p1: paint.grad_p1,
            stops: paint.stops,
            border_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, LinearGradient, Paint};
    use crate::scene::shapes::Border;

    fn disc(paint: Paint) -> CircleCmd {
        CircleCmd::new(Vec2::new(50.0, 50.0), 20.0, paint, None)
    }

    #[test]
    fn instance_layout_is_112_bytes() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 112);
        assert_eq!(CircleInstance::layout().array_stride, 112);
    }

    #[test]
    fn gradient_middle_stop_reaches_instance_data() {
        let mut warned = false;
        let green = Color::from_hex(0x22C55E);
        let ocean = LinearGradient::evenly_spaced(
            Vec2::new(30.0, 50.0),
            Vec2::new(70.0, 50.0),
            &[Color::from_hex(0x3B82F6), green, Color::from_hex(0x1D4ED8)],
        );
        let inst = CircleInstance::from_cmd(&disc(Paint::LinearGradient(ocean)), &mut warned)
            .unwrap();
        assert_eq!(inst.color_mid, green.to_srgb_premul());
        assert_ne!(inst.color_mid, inst.color0);
        assert_ne!(inst.color_mid, inst.color1);
        assert_eq!(&inst.stops[..3], &[0.0, 0.5, 1.0]);
        assert_eq!(inst.grad_p0, [30.0, 50.0]);
        assert_eq!(inst.grad_p1, [70.0, 50.0]);
    }

    #[test]
    fn invisible_or_degenerate_circles_are_skipped() {
        let mut warned = false;
        let clear = Paint::Solid(Color::transparent());
        assert!(CircleInstance::from_cmd(&disc(clear.clone()), &mut warned).is_none());

        let mut zero = disc(Paint::Solid(Color::white()));
        zero.radius = 0.0;
        assert!(CircleInstance::from_cmd(&zero, &mut warned).is_none());

        let ring = CircleCmd::new(Vec2::zero(), 10.0, clear, Some(Border::new(25.0, Color::white())));
        let inst = CircleInstance::from_cmd(&ring, &mut warned).unwrap();
        assert_eq!(inst.radius_bw, [10.0, 10.0]);
        assert_eq!(inst.border_color, [1.0; 4]);
    }
}
