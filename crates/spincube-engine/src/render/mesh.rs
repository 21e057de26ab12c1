//! Forward renderer for `world::Scene`.
//!
//! One directional light, Blinn-Phong shading, one draw call per node.
//! Per-node uniforms live in a single buffer addressed by dynamic offset.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::coords::PhysicalRect;
use crate::render::{RenderCtx, RenderTarget};
use crate::world::{Geometry, Node, PerspectiveCamera, Scene, TextureImage, Vertex};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlobalsUniform {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_dir: [f32; 4],
    light_color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
    specular: [f32; 4],
}

impl ObjectUniform {
    fn from_node(node: &Node) -> Self {
        let model = node.transform.matrix();
        let m = &node.material;
        let [sr, sg, sb, _] = m.specular.to_straight();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color: m.color.to_straight(),
            specular: [sr, sg, sb, m.shininess],
        }
    }
}

fn globals_uniform(scene: &Scene, camera: &PerspectiveCamera) -> GlobalsUniform {
    let dir = scene.light.to_light();
    let radiance = scene.light.radiance();
    GlobalsUniform {
        view_proj: camera.view_projection().to_cols_array_2d(),
        camera_pos: camera.position.extend(1.0).to_array(),
        light_dir: dir.extend(0.0).to_array(),
        light_color: radiance.extend(1.0).to_array(),
    }
}

/// Rounds `size` up to a multiple of `alignment`.
fn align_to(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment.max(1)) * alignment.max(1)
}

struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

struct GpuTexture {
    version: u64,
    bind_group: wgpu::BindGroup,
    _texture: wgpu::Texture,
}

struct DepthTarget {
    size: (u32, u32),
    view: wgpu::TextureView,
}

struct Pipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    globals_bgl: wgpu::BindGroupLayout,
    object_bgl: wgpu::BindGroupLayout,
    texture_bgl: wgpu::BindGroupLayout,
}

/// Draws every node of a [`Scene`] into a sub-rectangle of the surface.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline: Option<Pipeline>,

    globals_ubo: Option<wgpu::Buffer>,
    globals_bind_group: Option<wgpu::BindGroup>,

    object_ubo: Option<wgpu::Buffer>,
    object_bind_group: Option<wgpu::BindGroup>,
    object_capacity: usize,
    object_stride: u64,

    sampler: Option<wgpu::Sampler>,
    fallback_texture: Option<GpuTexture>,
    textures: Vec<Option<GpuTexture>>,
    /// `(slot, version)` pairs too large for the device; drawn with the fallback.
    rejected_textures: Vec<(usize, u64)>,
    meshes: Vec<Option<GpuMesh>>,

    depth: Option<DepthTarget>,
    staging: Vec<u8>,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `scene` through `camera` into `area` (physical pixels).
    ///
    /// The color target is loaded, not cleared; depth is cleared per call.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &Scene,
        camera: &PerspectiveCamera,
        area: PhysicalRect,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_depth(ctx);
        self.ensure_globals(ctx);
        self.ensure_fallback_texture(ctx);

        let node_count = scene.node_count();
        self.ensure_object_capacity(ctx, node_count.max(1));

        // Upload per-node data and resolve GPU resources before the pass.
        let mut draws: Vec<(u32, usize, Option<usize>)> = Vec::with_capacity(node_count);
        self.staging.clear();
        for (slot, (_, node)) in scene.nodes().enumerate() {
            let Some(geometry) = scene.geometry(node.geometry) else {
                log::warn!("node references unknown geometry {:?}", node.geometry);
                continue;
            };
            self.ensure_mesh(ctx, node.geometry.index(), geometry);

            let texture = node.material.texture.and_then(|id| {
                let image = scene.texture(id)?;
                let (image, version) = (image.image()?, image.version());
                self.ensure_texture(ctx, id.index(), image, version);
                Some(id.index())
            });

            let offset = slot as u64 * self.object_stride;
            self.staging.resize(offset as usize, 0);
            self.staging.extend_from_slice(bytemuck::bytes_of(&ObjectUniform::from_node(node)));
            draws.push((offset as u32, node.geometry.index(), texture));
        }

        let (Some(pipeline), Some(globals_ubo), Some(globals_bg), Some(object_ubo), Some(object_bg), Some(fallback), Some(depth)) = (
            self.pipeline.as_ref(),
            self.globals_ubo.as_ref(),
            self.globals_bind_group.as_ref(),
            self.object_ubo.as_ref(),
            self.object_bind_group.as_ref(),
            self.fallback_texture.as_ref(),
            self.depth.as_ref(),
        ) else {
            return;
        };

        ctx.queue.write_buffer(globals_ubo, 0, bytemuck::bytes_of(&globals_uniform(scene, camera)));
        if !self.staging.is_empty() {
            ctx.queue.write_buffer(object_ubo, 0, &self.staging);
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("spincube mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(
            area.x as f32,
            area.y as f32,
            area.width as f32,
            area.height as f32,
            0.0,
            1.0,
        );
        rpass.set_scissor_rect(area.x, area.y, area.width, area.height);
        rpass.set_pipeline(&pipeline.pipeline);
        rpass.set_bind_group(0, globals_bg, &[]);

        for (offset, mesh_index, texture_index) in draws {
            let Some(Some(mesh)) = self.meshes.get(mesh_index) else { continue };
            let texture = texture_index
                .and_then(|i| self.textures.get(i))
                .and_then(Option::as_ref)
                .unwrap_or(fallback);

            rpass.set_bind_group(1, object_bg, &[offset]);
            rpass.set_bind_group(2, &texture.bind_group, &[]);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline.as_ref().is_some_and(|p| p.format == ctx.surface_format) {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("spincube mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let uniform_entry = |visibility, dynamic: bool, size: usize| wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: dynamic,
                min_binding_size: wgpu::BufferSize::new(size as u64),
            },
            count: None,
        };

        let globals_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("spincube mesh globals bgl"),
            entries: &[uniform_entry(
                wgpu::ShaderStages::VERTEX_FRAGMENT,
                false,
                std::mem::size_of::<GlobalsUniform>(),
            )],
        });

        let object_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("spincube mesh object bgl"),
            entries: &[uniform_entry(
                wgpu::ShaderStages::VERTEX_FRAGMENT,
                true,
                std::mem::size_of::<ObjectUniform>(),
            )],
        });

        let texture_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("spincube mesh texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("spincube mesh pipeline layout"),
            bind_group_layouts: &[&globals_bgl, &object_bgl, &texture_bgl],
            immediate_size: 0,
        });

        const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3, // position
            1 => Float32x3, // normal
            2 => Float32x2  // uv
        ];

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("spincube mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRS,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline = Some(Pipeline {
            format: ctx.surface_format,
            pipeline,
            globals_bgl,
            object_bgl,
            texture_bgl,
        });

        // Bind groups depend on the layouts.
        self.globals_ubo = None;
        self.globals_bind_group = None;
        self.object_ubo = None;
        self.object_bind_group = None;
        self.object_capacity = 0;
        self.fallback_texture = None;
        self.textures.clear();
        self.rejected_textures.clear();
    }

    fn ensure_depth(&mut self, ctx: &RenderCtx<'_>) {
        let size = (ctx.surface_size.0.max(1), ctx.surface_size.1.max(1));
        if self.depth.as_ref().is_some_and(|d| d.size == size) {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("spincube mesh depth"),
            size: wgpu::Extent3d { width: size.0, height: size.1, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.depth = Some(DepthTarget { size, view });
    }

    fn ensure_globals(&mut self, ctx: &RenderCtx<'_>) {
        if self.globals_bind_group.is_some() {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spincube mesh globals ubo"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spincube mesh globals bind group"),
            layout: &pipeline.globals_bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
        });

        self.globals_ubo = Some(ubo);
        self.globals_bind_group = Some(bind_group);
    }

    fn ensure_object_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.object_capacity && self.object_bind_group.is_some() {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return };

        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        self.object_stride = align_to(std::mem::size_of::<ObjectUniform>() as u64, alignment);

        let capacity = required.next_power_of_two().max(8);
        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spincube mesh object ubo"),
            size: capacity as u64 * self.object_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spincube mesh object bind group"),
            layout: &pipeline.object_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
        });

        self.object_ubo = Some(ubo);
        self.object_bind_group = Some(bind_group);
        self.object_capacity = capacity;
    }

    fn ensure_fallback_texture(&mut self, ctx: &RenderCtx<'_>) {
        if self.fallback_texture.is_some() {
            return;
        }
        self.fallback_texture = self.upload_texture(ctx, &TextureImage::white(), 0);
    }

    fn ensure_texture(&mut self, ctx: &RenderCtx<'_>, index: usize, image: &TextureImage, version: u64) {
        if let Some(Some(existing)) = self.textures.get(index) {
            if existing.version == version {
                return;
            }
        }

        let max_dimension = ctx.device.limits().max_texture_dimension_2d;
        if !image.fits(max_dimension) {
            if !self.rejected_textures.contains(&(index, version)) {
                log::warn!(
                    "texture {index} ({}x{}) exceeds the device limit of {max_dimension}, using white",
                    image.width,
                    image.height
                );
                self.rejected_textures.push((index, version));
            }
            return;
        }

        let Some(uploaded) = self.upload_texture(ctx, image, version) else { return };
        if self.textures.len() <= index {
            self.textures.resize_with(index + 1, || None);
        }
        log::debug!("uploaded texture {index} ({}x{}, v{version})", image.width, image.height);
        self.textures[index] = Some(uploaded);
    }

    fn upload_texture(&mut self, ctx: &RenderCtx<'_>, image: &TextureImage, version: u64) -> Option<GpuTexture> {
        let pipeline = self.pipeline.as_ref()?;
        let sampler = self.sampler.get_or_insert_with(|| {
            ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("spincube mesh sampler"),
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                ..Default::default()
            })
        });

        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("spincube mesh texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spincube mesh texture bind group"),
            layout: &pipeline.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(sampler) },
            ],
        });

        Some(GpuTexture { version, bind_group, _texture: texture })
    }

    fn ensure_mesh(&mut self, ctx: &RenderCtx<'_>, index: usize, geometry: &Geometry) {
        if matches!(self.meshes.get(index), Some(Some(_))) {
            return;
        }
        if self.meshes.len() <= index {
            self.meshes.resize_with(index + 1, || None);
        }

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("spincube mesh vbo"),
            contents: bytemuck::cast_slice(geometry.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Index buffer writes must be 4-byte aligned.
        let mut indices = geometry.indices().to_vec();
        if indices.len() % 2 != 0 {
            indices.push(0);
        }
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("spincube mesh ibo"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        self.meshes[index] = Some(GpuMesh {
            vbo,
            ibo,
            index_count: geometry.indices().len() as u32,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::world::{GeometryId, Material, Transform};
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    fn align_rounds_up_to_alignment() {
        assert_eq!(align_to(160, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
    }

    #[test]
    fn object_uniform_fits_default_stride() {
        assert!(std::mem::size_of::<ObjectUniform>() <= 256);
        assert_eq!(std::mem::size_of::<GlobalsUniform>() % 16, 0);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let node = Node {
            geometry: GeometryId(0),
            material: Material::phong(Color::WHITE),
            transform: Transform { scale: Vec3::new(2.0, 1.0, 1.0), ..Transform::IDENTITY },
        };
        let u = ObjectUniform::from_node(&node);
        let n = Mat4::from_cols_array_2d(&u.normal_matrix).transform_vector3(Vec3::X);
        assert_relative_eq!(n.x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn globals_carry_light_toward_source() {
        let mut scene = Scene::new();
        scene.light.position = Vec3::new(-1.0, 2.0, 4.0);
        let cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);

        let g = globals_uniform(&scene, &cam);
        let dir = Vec3::new(g.light_dir[0], g.light_dir[1], g.light_dir[2]);
        assert_relative_eq!(dir.length(), 1.0, epsilon = 1e-6);
        assert!(dir.x < 0.0 && dir.y > 0.0 && dir.z > 0.0);
        assert_eq!(g.light_color[..3], [1.0, 1.0, 1.0]);
    }
}
