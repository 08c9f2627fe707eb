use bytemuck::{Pod, Zeroable};

use crate::coords::{Vec2, Viewport};
use crate::paint::Color;

/// The frame being recorded, as seen by a renderer.
pub struct Canvas<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub format: wgpu::TextureFormat,
    pub viewport: Viewport, // physical px
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
}

impl Canvas<'_> {
    /// True when the target stores raw values, so linear colors must be
    /// sRGB-encoded before they are written.
    #[inline]
    pub fn needs_srgb_encoding(&self) -> bool {
        !self.format.is_srgb()
    }
}

/// One vertex of a triangle list.
///
/// `position` is in physical pixels, `color` is linear premultiplied RGBA and
/// `tex_coord` is carried for layout compatibility (no texture is sampled).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x4, // color
        2 => Float32x2  // tex_coord
    ];

    #[inline]
    pub fn new(position: Vec2, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            tex_coord: [0.0, 0.0],
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    encode_srgb: f32, // 1.0 for linear targets
    _pad: f32,        // 16-byte alignment
}

/// Untextured triangle-list renderer.
///
/// Each `render` call uploads the full vertex slice and draws it in one pass
/// on top of the current target contents. GPU resources are created lazily and
/// rebuilt when the surface format changes.
#[derive(Default)]
pub struct GeometryRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    warned_partial_triangle: bool,
}

impl GeometryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `vertices` as a triangle list onto `canvas`.
    ///
    /// Trailing vertices that do not form a whole triangle are dropped.
    pub fn render(&mut self, canvas: &mut Canvas<'_>, vertices: &[Vertex]) {
        let count = whole_triangle_vertices(vertices.len());
        if count != vertices.len() && !self.warned_partial_triangle {
            log::debug!(
                "GeometryRenderer: {} trailing vertices ignored",
                vertices.len() - count
            );
            self.warned_partial_triangle = true;
        }
        if count == 0 || !canvas.viewport.is_valid() {
            return;
        }
        let vertices = &vertices[..count];

        self.ensure_pipeline(canvas);
        self.ensure_bindings(canvas);
        self.ensure_vertex_capacity(canvas, count);

        self.write_viewport_uniform(canvas);

        let Some(vbo) = self.vbo.as_ref() else { return };
        canvas.queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let byte_len = std::mem::size_of_val(vertices) as u64;

        let mut rpass = canvas.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("spin geometry pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: canvas.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..byte_len));
        rpass.draw(0..count as u32, 0..1);
    }

    fn ensure_pipeline(&mut self, canvas: &Canvas<'_>) {
        if self.pipeline_format == Some(canvas.format) && self.pipeline.is_some() {
            return;
        }

        let shader = canvas.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("spin geometry shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/geometry.wgsl").into()),
        });

        let bind_group_layout =
            canvas.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("spin geometry bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<ViewportUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            canvas.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("spin geometry pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = canvas.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("spin geometry pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: canvas.format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Rotation flips winding relative to the viewport, so no culling.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(canvas.format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, canvas: &Canvas<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = canvas.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spin geometry viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = canvas.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spin geometry bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_viewport_uniform(&mut self, canvas: &Canvas<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        let u = ViewportUniform {
            viewport: [canvas.viewport.width.max(1.0), canvas.viewport.height.max(1.0)],
            encode_srgb: srgb_encode_flag(canvas.format),
            _pad: 0.0,
        };
        canvas.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_vertex_capacity(&mut self, canvas: &Canvas<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        let new_cap = grown_capacity(required);

        self.vbo = Some(canvas.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spin geometry vbo"),
            size: (new_cap * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}

#[inline]
fn whole_triangle_vertices(len: usize) -> usize {
    len - len % 3
}

#[inline]
fn srgb_encode_flag(format: wgpu::TextureFormat) -> f32 {
    if format.is_srgb() { 0.0 } else { 1.0 }
}

#[inline]
fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}
