use super::post::DEPTH_FORMAT;
use glam::Mat4;
use swarm_core::MemberTransform;
use wgpu::util::DeviceExt;

static SWORD_WGSL: &str = include_str!("../../shaders/sword.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    color: [f32; 3],
    time: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// Per-instance transform as uploaded each frame: position plus a unit
/// quaternion, expanded to a model matrix in the vertex shader.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    position: [f32; 3],
    _pad: f32,
    rotation: [f32; 4],
}

impl From<MemberTransform> for InstanceRaw {
    fn from(m: MemberTransform) -> Self {
        Self {
            position: m.position.to_array(),
            _pad: 0.0,
            rotation: m.rotation.to_array(),
        }
    }
}

pub(crate) struct SwordResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) capacity: u32,
}

impl SwordResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        hdr_format: wgpu::TextureFormat,
        instance_capacity: usize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sword_shader"),
            source: wgpu::ShaderSource::Wgsl(SWORD_WGSL.into()),
        });

        let (vertices, indices) = sword_geometry();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sword_vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sword_indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sword_instances"),
            size: (instance_capacity.max(1) * std::mem::size_of::<InstanceRaw>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sword_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sword_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sword_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let vertex_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 12,
                        shader_location: 1,
                    },
                ],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceRaw>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sword_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_layouts,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Thin double-sided blades; culling buys nothing here
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: hdr_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            index_count: indices.len() as u32,
            capacity: instance_capacity as u32,
        }
    }

    pub(crate) fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        view_proj: Mat4,
        color: [f32; 3],
        time: f32,
    ) {
        let u = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            color,
            time,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }
}

/// Low-poly sword blade: a slim four-sided cone along +Z, tip forward, so a
/// look-at rotation points it where it flies.
fn sword_geometry() -> (Vec<Vertex>, Vec<u16>) {
    const RADIUS: f32 = 0.03;
    const HALF_LEN: f32 = 0.5;
    const SIDES: usize = 4;

    let mut vertices = Vec::with_capacity(SIDES + 2);
    // Lateral normals tilt outward by the cone slope
    let slope = (RADIUS / (2.0 * HALF_LEN)).atan();
    let (ns, nc) = slope.sin_cos();
    for k in 0..SIDES {
        let theta = k as f32 / SIDES as f32 * std::f32::consts::TAU;
        let (s, c) = theta.sin_cos();
        vertices.push(Vertex {
            position: [RADIUS * c, RADIUS * s, -HALF_LEN],
            normal: [nc * c, nc * s, ns],
        });
    }
    let tip = vertices.len() as u16;
    vertices.push(Vertex {
        position: [0.0, 0.0, HALF_LEN],
        normal: [0.0, 0.0, 1.0],
    });
    let base = vertices.len() as u16;
    vertices.push(Vertex {
        position: [0.0, 0.0, -HALF_LEN],
        normal: [0.0, 0.0, -1.0],
    });

    let mut indices = Vec::with_capacity(SIDES * 6);
    for k in 0..SIDES as u16 {
        let next = (k + 1) % SIDES as u16;
        indices.extend_from_slice(&[k, next, tip]);
        indices.extend_from_slice(&[next, k, base]);
    }
    (vertices, indices)
}
