use crate::camera::OrbitCamera;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use plume_geometry::{MeshBuffers, MeshSink};
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    params: [f32; 4],
}

/// Per-frame shader inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderParams {
    /// Seconds since startup.
    pub time: f32,
    pub time_scale: f32,
    pub plume_height: f32,
    pub color_gain: f32,
}

impl ShaderParams {
    fn to_array(self) -> [f32; 4] {
        [self.time, self.time_scale, self.plume_height, self.color_gain]
    }
}

/// Mesh resident on the GPU: one index buffer, two vertex attribute buffers.
pub struct GpuMesh {
    pub index_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub position_buffer: wgpu::Buffer,
    pub count: u32,
}

/// [`MeshSink`] that creates GPU buffers on an explicitly borrowed device.
///
/// Buffers are created with their contents and without `COPY_DST`, so their
/// contents never change after upload.
pub struct MeshUploader<'a> {
    device: &'a wgpu::Device,
}

impl<'a> MeshUploader<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }
}

impl MeshSink for MeshUploader<'_> {
    type Drawable = GpuMesh;

    fn upload(&mut self, mesh: &MeshBuffers) -> GpuMesh {
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        let normal_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_normal_buffer"),
            contents: bytemuck::cast_slice(mesh.normal_floats()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let position_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_position_buffer"),
            contents: bytemuck::cast_slice(mesh.position_floats()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        GpuMesh {
            index_buffer,
            normal_buffer,
            position_buffer,
            count: mesh.count(),
        }
    }
}

/// wgpu renderer drawing meshes through the plume shader.
pub struct PlumeRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    clear_color: wgpu::Color,
    surface_format: wgpu::TextureFormat,
}

impl PlumeRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                params: [0.0; 4],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("plume_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::PLUME_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("plume_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    // Positions and normals live in separate buffers.
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 4]>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x4],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 4]>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![1 => Float32x4],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // The cube's two triangles per face wind in opposite directions,
            // so nothing may be culled.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            depth_texture,
            clear_color: wgpu::Color {
                r: 0.2,
                g: 0.2,
                b: 0.2,
                a: 1.0,
            },
            surface_format,
        }
    }

    pub fn set_clear_color(&mut self, r: f64, g: f64, b: f64, a: f64) {
        self.clear_color = wgpu::Color { r, g, b, a };
    }

    pub fn clear_color(&self) -> wgpu::Color {
        self.clear_color
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: clear, then draw every mesh with the plume shader.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrbitCamera,
        params: ShaderParams,
        meshes: &[&GpuMesh],
    ) {
        let _span = tracing::trace_span!("render", meshes = meshes.len()).entered();

        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: camera.view_projection().to_cols_array_2d(),
                params: params.to_array(),
            }),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            for mesh in meshes {
                if mesh.count == 0 {
                    continue;
                }
                pass.set_vertex_buffer(0, mesh.position_buffer.slice(..));
                pass.set_vertex_buffer(1, mesh.normal_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_matches_shader() {
        // mat4x4<f32> + vec4<f32>
        assert_eq!(std::mem::size_of::<Uniforms>(), 80);
    }

    #[test]
    fn shader_params_packing_order() {
        let params = ShaderParams {
            time: 1.0,
            time_scale: 2.0,
            plume_height: 3.0,
            color_gain: 4.0,
        };
        assert_eq!(params.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn vertex_stride_matches_mesh_floats() {
        let mesh = plume_geometry::Cube::new(glam::Vec3::ZERO).build();
        let stride = std::mem::size_of::<[f32; 4]>();
        assert_eq!(
            std::mem::size_of_val(mesh.position_floats()),
            stride * mesh.vertex_count()
        );
        assert_eq!(
            std::mem::size_of_val(mesh.normal_floats()),
            stride * mesh.vertex_count()
        );
    }
}
