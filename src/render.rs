use crate::constants::{LINE_OPACITY, POINT_DISC_CUTOFF, POINT_SIZE};
use glam::{Mat4, Vec3};
use portfolio_core::{SphereMesh, Theme};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct WireUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    // x: point size, y: line opacity, z: point disc cutoff
    params: [f32; 4],
}

impl WireUniforms {
    fn new(color: [f32; 4]) -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            model: Mat4::IDENTITY.to_cols_array_2d(),
            color,
            params: [POINT_SIZE, LINE_OPACITY, POINT_DISC_CUTOFF, 0.0],
        }
    }
}

/// WebGPU resources for the wireframe sphere: one dynamic position buffer
/// shared by a line-list pass (indexed by the fixed edge list) and an
/// instanced billboard pass drawing one round point per vertex.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    line_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    position_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    vertex_count: u32,
    index_count: u32,
    uniforms: WireUniforms,
    srgb_target: bool,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        mesh: &SphereMesh,
        initial_positions: &[Vec3],
        theme: Theme,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    label: Some("wire_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;

        let caps = surface.get_capabilities(&adapter);
        let format = helpers::pick_surface_format(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: helpers::pick_alpha_mode(&caps.alpha_modes),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            config.alpha_mode
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wireframe_shader"),
            source: wgpu::ShaderSource::Wgsl(portfolio_core::WIREFRAME_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("wire_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("wire_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let line_pipeline = helpers::make_wire_pipeline(
            &device,
            "line_pipeline",
            &pl,
            &shader,
            ("vs_line", "fs_line"),
            wgpu::PrimitiveTopology::LineList,
            wgpu::VertexStepMode::Vertex,
            format,
        );
        let point_pipeline = helpers::make_wire_pipeline(
            &device,
            "point_pipeline",
            &pl,
            &shader,
            ("vs_point", "fs_point"),
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::VertexStepMode::Instance,
            format,
        );

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wire_positions"),
            contents: bytemuck::cast_slice(initial_positions),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wire_edges"),
            contents: bytemuck::cast_slice(mesh.edge_indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let srgb_target = format.is_srgb();
        let uniforms = WireUniforms::new(accent_for(theme, srgb_target));
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wire_uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wire_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            line_pipeline,
            point_pipeline,
            position_buffer,
            index_buffer,
            uniform_buffer,
            bind_group,
            vertex_count: mesh.vertex_count() as u32,
            index_count: mesh.edge_indices().len() as u32,
            uniforms,
            srgb_target,
            width,
            height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Rewrite the position buffer in place; the length never changes.
    pub fn upload_positions(&self, positions: &[Vec3]) {
        self.queue
            .write_buffer(&self.position_buffer, 0, bytemuck::cast_slice(positions));
    }

    pub fn set_transforms(&mut self, view: Mat4, proj: Mat4, model: Mat4) {
        self.uniforms.view = view.to_cols_array_2d();
        self.uniforms.proj = proj.to_cols_array_2d();
        self.uniforms.model = model.to_cols_array_2d();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.uniforms.color = accent_for(theme, self.srgb_target);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("wire_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("wire_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.position_buffer.slice(..));

            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.index_count, 0, 0..1);

            rpass.set_pipeline(&self.point_pipeline);
            rpass.draw(0..6, 0..self.vertex_count);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[inline]
fn accent_for(theme: Theme, srgb_target: bool) -> [f32; 4] {
    if srgb_target {
        theme.accent_rgba()
    } else {
        theme.accent_srgba()
    }
}
