use cubexr_shared::geometry::{MeshGeometry, Vertex};
use cubexr_shared::shaders::NORMAL_MATERIAL;
use cubexr_shared::uniforms::PerObjectUniforms;
use web_sys::HtmlCanvasElement;
use wgpu::util::DeviceExt;

use crate::error::{LaunchError, RenderError};
use crate::renderer::Renderer;
use crate::scene::{PerspectiveCamera, RenderableObject, Scene};
use crate::viewport::Viewport;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
const MSAA_SAMPLES: u32 = 4;
const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// GPU mesh with vertex and index buffers.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Buffers for one scene object. Slot `i` belongs to the scene's `i`th object.
struct ObjectSlot {
    mesh: GpuMesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Depth buffer plus the multisampled colour target when antialiasing.
struct FrameTargets {
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
}

/// wgpu renderer drawing into a page canvas.
pub struct GpuRenderer {
    canvas: HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    object_layout: wgpu::BindGroupLayout,
    targets: FrameTargets,
    slots: Vec<ObjectSlot>,
    sample_count: u32,
}

impl GpuRenderer {
    /// Create the device and pipeline for `canvas`, sized to `viewport`.
    pub async fn new(canvas: HtmlCanvasElement, viewport: Viewport, antialias: bool) -> Result<Self, LaunchError> {
        let width = viewport.width.max(1);
        let height = viewport.height.max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| LaunchError::Gpu(format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| LaunchError::Gpu("Failed to find suitable GPU adapter".into()))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("CubeXR Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| LaunchError::Gpu(format!("Failed to create device: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| LaunchError::Gpu("Surface reports no texture formats".into()))?;

        let sample_count = if antialias
            && adapter
                .get_texture_format_features(surface_format)
                .flags
                .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            1
        };

        let max_dimension = device.limits().max_texture_dimension_2d;
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.min(max_dimension),
            height: height.min(max_dimension),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Per-Object Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline = create_normal_pipeline(&device, &object_layout, surface_format, sample_count);
        let targets = create_frame_targets(&device, &surface_config, sample_count);

        let info = adapter.get_info();
        log::info!(
            "GPU renderer initialized: {} ({}), {}x{}, {}x MSAA",
            info.name,
            info.backend.to_str(),
            surface_config.width,
            surface_config.height,
            sample_count,
        );

        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            surface_config,
            pipeline,
            object_layout,
            targets,
            slots: Vec::new(),
            sample_count,
        })
    }

    /// Upload buffers for objects added since the last frame. Objects are never
    /// removed from a scene, so slots only grow.
    fn sync_objects(&mut self, scene: &Scene) {
        for object in scene.objects().skip(self.slots.len()) {
            let slot = self.create_slot(object);
            self.slots.push(slot);
        }
    }

    fn create_slot(&self, object: &RenderableObject) -> ObjectSlot {
        let mesh = self.upload_mesh(&object.geometry);

        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Per-Object Uniforms"),
            size: std::mem::size_of::<PerObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Per-Object Bind Group"),
            layout: &self.object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        ObjectSlot {
            mesh,
            uniform_buffer,
            bind_group,
        }
    }

    fn upload_mesh(&self, geometry: &MeshGeometry) -> GpuMesh {
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: geometry.index_count(),
        }
    }
}

impl Renderer for GpuRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.sync_objects(scene);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(RenderError::DeviceLost("out of GPU memory".into()));
            }
            Err(e) => return Err(RenderError::Surface(e.to_string())),
        };

        let projection = camera.projection();
        let view = camera.view_matrix();
        for (slot, object) in self.slots.iter().zip(scene.objects()) {
            let uniforms = PerObjectUniforms::new(projection, view, object.model_matrix());
            self.queue.write_buffer(&slot.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        let frame_view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let (color_view, resolve_target) = match &self.targets.msaa_view {
            Some(msaa_view) => (msaa_view, Some(&frame_view)),
            None => (&frame_view, None),
        };
        let [r, g, b, a] = scene.clear_color;

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
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
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            for slot in &self.slots {
                pass.set_bind_group(0, &slot.bind_group, &[]);
                pass.set_vertex_buffer(0, slot.mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(slot.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..slot.mesh.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let max_dimension = self.device.limits().max_texture_dimension_2d;
        let width = width.min(max_dimension);
        let height = height.min(max_dimension);

        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.targets = create_frame_targets(&self.device, &self.surface_config, self.sample_count);
    }

    fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}

fn create_normal_pipeline(
    device: &wgpu::Device,
    object_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
    sample_count: u32,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Normal Material Shader"),
        source: wgpu::ShaderSource::Wgsl(NORMAL_MATERIAL.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Normal Material Pipeline Layout"),
        bind_group_layouts: &[object_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Normal Material Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRIBUTES,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
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
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

fn create_frame_targets(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    sample_count: u32,
) -> FrameTargets {
    let size = wgpu::Extent3d {
        width: config.width,
        height: config.height,
        depth_or_array_layers: 1,
    };

    let depth = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Buffer"),
        size,
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    let msaa_view = (sample_count > 1).then(|| {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("MSAA Colour Target"),
                size,
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: config.format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    });

    FrameTargets {
        depth_view: depth.create_view(&wgpu::TextureViewDescriptor::default()),
        msaa_view,
    }
}
