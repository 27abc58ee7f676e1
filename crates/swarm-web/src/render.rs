use crate::constants::{
    BLOOM_STRENGTH, BLOOM_THRESHOLD, CAMERA_EYE, CAMERA_FOV_DEG, CAMERA_TARGET, CAMERA_ZFAR,
    CAMERA_ZNEAR, CLEAR_COLOR, SWORD_COLOR,
};
use glam::{Mat4, Vec3};
use swarm_core::MemberTransform;
use web_sys as web;

mod post;
mod swords;

use post::{PostBindGroups, PostResources, RenderTargets};
use swords::{InstanceRaw, SwordResources};

/// WebGPU state for the sword swarm scene: one instanced sword pass into an
/// HDR target, then bright-pass / blur / composite for the bloom glow.
pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    swords: SwordResources,
    targets: RenderTargets,
    post: PostResources,
    bind_groups: PostBindGroups,

    instance_scratch: Vec<InstanceRaw>,
    width: u32,
    height: u32,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        instance_capacity: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let swords = SwordResources::new(&device, post::HDR_FORMAT, instance_capacity);
        let post = PostResources::new(&device, post::HDR_FORMAT, format);
        let bind_groups = post.build_bind_groups(&device, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            swords,
            targets,
            post,
            bind_groups,
            instance_scratch: Vec::with_capacity(instance_capacity),
            width,
            height,
            time_accum: 0.0,
        })
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

            self.targets.recreate(&self.device, width, height);
            self.bind_groups = self.post.build_bind_groups(&self.device, &self.targets);
        }
    }

    fn view_proj(&self) -> Mat4 {
        let aspect = self.width.max(1) as f32 / self.height.max(1) as f32;
        let proj = Mat4::perspective_rh(
            CAMERA_FOV_DEG.to_radians(),
            aspect,
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        );
        let view = Mat4::look_at_rh(CAMERA_EYE, CAMERA_TARGET, Vec3::Y);
        proj * view
    }

    /// Draw one frame: upload the per-member transforms, advance the shader
    /// time uniform, render the swords into HDR, then run the bloom chain.
    pub fn render(
        &mut self,
        dt_sec: f32,
        members: impl Iterator<Item = MemberTransform>,
    ) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.instance_scratch.clear();
        self.instance_scratch.extend(
            members
                .take(self.swords.capacity as usize)
                .map(InstanceRaw::from),
        );
        let instance_count = self.instance_scratch.len() as u32;
        self.queue.write_buffer(
            &self.swords.instance_buffer,
            0,
            bytemuck::cast_slice(&self.instance_scratch),
        );
        self.swords.write_uniforms(
            &self.queue,
            self.view_proj(),
            SWORD_COLOR,
            self.time_accum,
        );

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.swords.pipeline);
            rpass.set_bind_group(0, &self.swords.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.swords.vertex_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.swords.instance_buffer.slice(..));
            rpass.set_index_buffer(self.swords.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.swords.index_count, 0, 0..instance_count);
        }

        let bloom_res = [self.width as f32 / 2.0, self.height as f32 / 2.0];
        self.post
            .write_uniforms(&self.queue, bloom_res, BLOOM_STRENGTH, BLOOM_THRESHOLD);

        // Bright pass: HDR -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            &self.post.bright_pipeline,
            &self.bind_groups.from_hdr,
            None,
        );

        // Horizontal blur: bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            &self.post.blur_pipeline,
            &self.bind_groups.from_bloom_a,
            None,
        );

        // Vertical blur: bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            &self.post.blur_pipeline,
            &self.bind_groups.from_bloom_b,
            None,
        );

        // Composite HDR + bloom to the swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            &self.post.composite_pipeline,
            &self.bind_groups.from_hdr,
            Some(&self.bind_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
