use bytemuck::Zeroable;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::PerspectiveCamera;
use crate::core::resize::{drawing_buffer_size, MAX_PIXEL_RATIO};
use crate::hud::{screen_descriptor, Hud, HudStats};
use crate::loaders::{RockTextures, TextureData};
use crate::scene::RockScene;
use crate::traits::RenderTarget;
use crate::types::{CameraUniform, MeshVertex};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

struct UniformBuffers {
    camera: wgpu::Buffer,
    model: wgpu::Buffer,
    lights: wgpu::Buffer,
    material: wgpu::Buffer,
}

/// Rasterizes the rock scene into the window surface
pub struct RockRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    logical_size: (u32, u32),
    pixel_ratio: f64,
    depth_view: wgpu::TextureView,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniforms: UniformBuffers,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uploaded_version: u64,
    hud: Option<Hud>,
}

impl RockRenderer {
    pub async fn new(
        window: Arc<Window>,
        scene: &RockScene,
        textures: &RockTextures,
        show_hud: bool,
    ) -> Result<Self> {
        let physical = window.inner_size();
        let logical: winit::dpi::LogicalSize<f64> = physical.to_logical(window.scale_factor());
        let logical_size = (logical.width.round() as u32, logical.height.round() as u32);
        let pixel_ratio = window
            .scale_factor()
            .min(MAX_PIXEL_RATIO);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let (width, height) = drawing_buffer_size(logical_size.0, logical_size.1, pixel_ratio);
        let config = Self::create_surface_config(&surface, &adapter, width.max(1), height.max(1))?;
        surface.configure(&device, &config);

        let depth_view = Self::create_depth_texture(&device, config.width, config.height);
        let uniforms = Self::create_uniform_buffers(&device, scene);

        let color_view = Self::upload_texture(
            &device,
            &queue,
            "Rock Color Map",
            &textures.color,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        let displacement_view = Self::upload_texture(
            &device,
            &queue,
            "Rock Displacement Map",
            &textures.displacement,
            wgpu::TextureFormat::Rgba8Unorm,
        );

        let (pipeline, bind_group) = Self::create_render_pipeline(
            &device,
            &uniforms,
            &color_view,
            &displacement_view,
            config.format,
        );

        let mesh = &scene.rock.mesh;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rock Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.to_vertices()),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rock Index Buffer"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let hud = show_hud.then(|| Hud::new(&device, config.format, &window));

        log::info!(
            "Renderer initialized: {}x{} surface, {:?}, hud {}",
            config.width,
            config.height,
            config.format,
            if show_hud { "on" } else { "off" }
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            logical_size,
            pixel_ratio,
            depth_view,
            pipeline,
            bind_group,
            uniforms,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices().len() as u32,
            uploaded_version: mesh.version(),
            hud,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| "Failed to find appropriate adapter".into())
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| e.into())
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or("Surface reports no supported formats")?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_uniform_buffers(device: &wgpu::Device, scene: &RockScene) -> UniformBuffers {
        let uniform = |label: &str, contents: &[u8]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
        };

        UniformBuffers {
            camera: uniform("Camera Buffer", bytemuck::bytes_of(&CameraUniform::zeroed())),
            model: uniform("Model Buffer", bytemuck::bytes_of(&scene.rock.model_uniform())),
            lights: uniform("Light Buffer", bytemuck::bytes_of(&scene.lights.to_uniform())),
            material: uniform(
                "Material Buffer",
                bytemuck::bytes_of(&scene.rock.material.to_uniform()),
            ),
        }
    }

    fn upload_texture(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        data: &TextureData,
        format: wgpu::TextureFormat,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * data.width),
                rows_per_image: Some(data.height),
            },
            size,
        );

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_render_pipeline(
        device: &wgpu::Device,
        uniforms: &UniformBuffers,
        color_view: &wgpu::TextureView,
        displacement_view: &wgpu::TextureView,
        surface_format: wgpu::TextureFormat,
    ) -> (wgpu::RenderPipeline, wgpu::BindGroup) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Rock Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("rock.wgsl").into()),
        });

        let stages = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: stages,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let texture_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: stages,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                uniform_entry(0),
                uniform_entry(1),
                uniform_entry(2),
                uniform_entry(3),
                texture_entry(4),
                texture_entry(5),
                wgpu::BindGroupLayoutEntry {
                    binding: 6,
                    visibility: stages,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("rock_bind_group_layout"),
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.camera.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniforms.model.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.lights.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: uniforms.material.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::TextureView(color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: wgpu::BindingResource::TextureView(displacement_view),
                },
                wgpu::BindGroupEntry {
                    binding: 6,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some("rock_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Rock Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Rock Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        (pipeline, bind_group)
    }

    /// Surface size in physical pixels
    pub fn buffer_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        match self.hud.as_mut() {
            Some(hud) => hud.handle_event(window, event),
            None => false,
        }
    }

    fn reconfigure(&mut self) {
        let (width, height) =
            drawing_buffer_size(self.logical_size.0, self.logical_size.1, self.pixel_ratio);
        if width == 0 || height == 0 {
            return;
        }
        if (width, height) == (self.config.width, self.config.height) {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_texture(&self.device, width, height);
    }

    /// Re-upload vertex data if the mesh changed since the last upload
    fn sync_mesh(&mut self, scene: &RockScene) {
        let mesh = &scene.rock.mesh;
        if mesh.version() == self.uploaded_version {
            return;
        }

        self.queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&mesh.to_vertices()),
        );
        self.uploaded_version = mesh.version();
        log::debug!("Re-uploaded rock mesh (version {})", self.uploaded_version);
    }

    fn write_uniforms(&self, scene: &RockScene, camera: &PerspectiveCamera) {
        let camera_uniform = camera.to_uniform();
        let model_uniform = scene.rock.model_uniform();
        let light_uniform = scene.lights.to_uniform();
        let material_uniform = scene.rock.material.to_uniform();

        self.queue
            .write_buffer(&self.uniforms.camera, 0, bytemuck::bytes_of(&camera_uniform));
        self.queue
            .write_buffer(&self.uniforms.model, 0, bytemuck::bytes_of(&model_uniform));
        self.queue
            .write_buffer(&self.uniforms.lights, 0, bytemuck::bytes_of(&light_uniform));
        self.queue.write_buffer(
            &self.uniforms.material,
            0,
            bytemuck::bytes_of(&material_uniform),
        );
    }

    pub fn render(
        &mut self,
        scene: &RockScene,
        camera: &PerspectiveCamera,
        window: &Window,
        stats: &HudStats,
    ) -> Result<()> {
        self.sync_mesh(scene);
        self.write_uniforms(scene, camera);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        let [r, g, b] = scene.clear_color_linear();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Rock Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        if let Some(hud) = self.hud.as_mut() {
            let stats = HudStats {
                buffer_size: (self.config.width, self.config.height),
                pixel_ratio: self.pixel_ratio,
                ..*stats
            };
            hud.draw(
                &self.device,
                &self.queue,
                &mut encoder,
                &view,
                window,
                &screen_descriptor([self.config.width, self.config.height], self.pixel_ratio),
                &stats,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl RenderTarget for RockRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.logical_size = (width, height);
        self.reconfigure();
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
        self.reconfigure();
    }

    fn size(&self) -> (u32, u32) {
        self.logical_size
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
}
