use bytemuck::{Pod, Zeroable};

use crate::paint::LinearGradient;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{premul_alpha_blend, triangle_list, ubo_min_binding_size};

/// Maximum number of gradient stops the backdrop shader evaluates.
pub const MAX_BACKDROP_STOPS: usize = 4;

/// Paints the whole viewport with a top-to-bottom gradient.
///
/// Only the gradient's stops are used; its axis is always the viewport's vertical
/// extent, so the backdrop follows window resizes without being rebuilt. Stops
/// beyond [`MAX_BACKDROP_STOPS`] are dropped (one-time debug message).
#[derive(Default)]
pub struct BackdropRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    ubo: Option<wgpu::Buffer>,

    /// Last uploaded uniform; the gradient is static so most frames skip the write.
    uploaded: Option<BackdropUniform>,

    warned_stops: bool,
}

impl BackdropRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        gradient: &LinearGradient,
    ) {
        let Some(uniform) = BackdropUniform::from_gradient(gradient, &mut self.warned_stops) else {
            return;
        };

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        if self.uploaded != Some(uniform) {
            let Some(ubo) = self.ubo.as_ref() else { return };
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
            self.uploaded = Some(uniform);
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.begin_load_pass("starfield backdrop pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("starfield backdrop shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/backdrop.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("starfield backdrop bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: ubo_min_binding_size::<BackdropUniform>(),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("starfield backdrop pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("starfield backdrop pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
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
        self.ubo = None;
        self.uploaded = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("starfield backdrop ubo"),
            size: std::mem::size_of::<BackdropUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("starfield backdrop bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.ubo = Some(ubo);
        self.bind_group = Some(bind_group);
        self.uploaded = None;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform layout (96 bytes):
///
///  offset  0  colors   [[f32; 4]; 4]   (premultiplied sRGB)
///  offset 64  offsets  [f32; 4]
///  offset 80  params   [f32; 4]   (.x = stop count)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct BackdropUniform {
    colors: [[f32; 4]; MAX_BACKDROP_STOPS],
    offsets: [f32; MAX_BACKDROP_STOPS],
    params: [f32; 4],
}

impl BackdropUniform {
    /// Returns `None` for a gradient with no stops (nothing to paint).
    fn from_gradient(gradient: &LinearGradient, warned: &mut bool) -> Option<Self> {
        if gradient.stops.is_empty() {
            return None;
        }
        if gradient.stops.len() > MAX_BACKDROP_STOPS && !*warned {
            log::debug!(
                "backdrop gradient has {} stops; only the first {MAX_BACKDROP_STOPS} are used",
                gradient.stops.len()
            );
            *warned = true;
        }

        let mut u = Self::zeroed();
        let mut count = 0usize;
        for (i, stop) in gradient.stops.iter().take(MAX_BACKDROP_STOPS).enumerate() {
            u.colors[i] = stop.color.to_srgb_premul();
            u.offsets[i] = stop.t.clamp(0.0, 1.0);
            count = i + 1;
        }
        u.params[0] = count as f32;
        Some(u)
    }
}
