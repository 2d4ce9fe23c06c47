use cgmath::Point3;
use wgpu::util::DeviceExt;

use crate::game::block::BlockKind;
use crate::game::camera::Camera;
use crate::game::world::BlockWorld;
use crate::rendering::texture::Texture;

/// Fov the held-block offsets were tuned at. Other fovs scale the offsets
/// so the cube stays anchored to the same corner of the screen.
const HELD_REFERENCE_FOV: f32 = 80.0;
const HELD_SCALE: f32 = 0.3;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl CubeVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// One cube drawn at `position`, scaled about its center, textured with
/// the atlas column `tile`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlockInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub tile: u32,
}

impl BlockInstance {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<BlockInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        }
    }
}

const FACE_UVS: [[f32; 2]; 6] = [
    [0.0, 1.0], // Bottom-left
    [1.0, 1.0], // Bottom-right
    [1.0, 0.0], // Top-right
    [0.0, 1.0], // Bottom-left
    [1.0, 0.0], // Top-right
    [0.0, 0.0], // Top-left
];

// Normal plus six corners per face of a cube spanning -1..1, wound
// counter-clockwise seen from outside.
#[rustfmt::skip]
const CUBE_FACES: [([f32; 3], [[f32; 3]; 6]); 6] = [
    // North (+z)
    ([0.0, 0.0, 1.0], [
        [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0],
        [-1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
    ]),
    // South (-z)
    ([0.0, 0.0, -1.0], [
        [ 1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0],
        [ 1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0],
    ]),
    // East (+x)
    ([1.0, 0.0, 0.0], [
        [ 1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0],
        [ 1.0, -1.0,  1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0],
    ]),
    // West (-x)
    ([-1.0, 0.0, 0.0], [
        [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0],
        [-1.0, -1.0, -1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
    ]),
    // Top (+y)
    ([0.0, 1.0, 0.0], [
        [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0],
        [-1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],
    ]),
    // Bottom (-y)
    ([0.0, -1.0, 0.0], [
        [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0],
        [-1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
    ]),
];

pub fn cube_vertices() -> Vec<CubeVertex> {
    let mut vertices = Vec::with_capacity(36);
    for (normal, corners) in CUBE_FACES {
        for (position, tex_coords) in corners.into_iter().zip(FACE_UVS) {
            vertices.push(CubeVertex {
                position,
                tex_coords,
                normal,
            });
        }
    }
    vertices
}

pub fn build_instances(world: &BlockWorld) -> Vec<BlockInstance> {
    world
        .blocks()
        .iter()
        .map(|block| BlockInstance {
            position: block.position.into(),
            scale: 1.0,
            tile: block.kind.atlas_tile(),
        })
        .collect()
}

/// Miniature cube pinned to the lower right of the view, showing the kind
/// the next right click will place.
pub fn held_block_instance(camera: &Camera, fov_degrees: f32, kind: BlockKind) -> BlockInstance {
    let factor = fov_degrees / HELD_REFERENCE_FOV;

    let direction = camera.get_direction();
    let right = camera.get_right();
    let up = right.cross(direction);

    let position: Point3<f32> = camera.position + direction * (1.5 * factor) + right * 0.7
        - up * (0.7 * (1.0 + (factor - 1.0) * 0.3));

    BlockInstance {
        position: position.into(),
        scale: HELD_SCALE,
        tile: kind.atlas_tile(),
    }
}

pub struct BlockRenderer {
    render_pipeline: wgpu::RenderPipeline,
    atlas_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    held_buffer: wgpu::Buffer,
    seen_revision: u64,
}

impl BlockRenderer {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        atlas_texture: &Texture,
        world: &BlockWorld,
    ) -> Self {
        let atlas_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
                label: Some("atlas_bind_group_layout"),
            });

        let atlas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &atlas_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&atlas_texture.sampler),
                },
            ],
            label: Some("atlas_bind_group"),
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Block Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../resources/shaders/blocks.wgsl").into(),
            ),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Block Pipeline Layout"),
                bind_group_layouts: &[&atlas_bind_group_layout, camera_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Block Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[CubeVertex::desc(), BlockInstance::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
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
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertices = cube_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instances = build_instances(world);
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Block Instance Buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let held_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Held Block Buffer"),
            size: std::mem::size_of::<BlockInstance>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            render_pipeline,
            atlas_bind_group,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            instance_buffer,
            instance_count: instances.len() as u32,
            held_buffer,
            seen_revision: world.revision(),
        }
    }

    pub fn update(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        world: &BlockWorld,
        camera: &Camera,
        fov_degrees: f32,
        held_kind: BlockKind,
    ) {
        // Only edits bump the revision, so most frames skip the rebuild.
        if world.revision() != self.seen_revision {
            let instances = build_instances(world);
            self.instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Block Instance Buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            });
            self.instance_count = instances.len() as u32;
            self.seen_revision = world.revision();
        }

        let held = held_block_instance(camera, fov_degrees, held_kind);
        queue.write_buffer(&self.held_buffer, 0, bytemuck::bytes_of(&held));
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, camera_bind_group: &wgpu::BindGroup) {
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.atlas_bind_group, &[]);
        render_pass.set_bind_group(1, camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        if self.instance_count > 0 {
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            render_pass.draw(0..self.vertex_count, 0..self.instance_count);
        }

        render_pass.set_vertex_buffer(1, self.held_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}
