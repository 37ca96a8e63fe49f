use crate::frame::FrameData;
use crate::gpu::SceneRenderer;
use aviator_common::ViewportSize;
use aviator_render::{PerspectiveCamera, RenderError, Renderer, RendererOptions};
use aviator_scene::SceneGraph;

const MSAA_SAMPLES: u32 = 4;

/// [`Renderer`] that draws into a window or canvas surface.
pub struct SurfaceRenderer {
    surface: wgpu::Surface<'static>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    options: Option<RendererOptions>,
    scene: Option<SceneRenderer>,
}

impl SurfaceRenderer {
    /// Acquire an adapter and device able to present to `target`.
    ///
    /// The surface is configured with an opaque alpha mode until
    /// [`Renderer::configure`] applies the requested options.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: ViewportSize,
    ) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .map_err(|e| RenderError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| RenderError::UnsupportedBackend("no compatible adapter".into()))?;

        let required_limits = if cfg!(target_arch = "wasm32") {
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
        } else {
            wgpu::Limits::default()
        };

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("aviator_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits,
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| RenderError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| RenderError::UnsupportedBackend("surface reports no formats".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            ?format,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
            config,
            options: None,
            scene: None,
        })
    }

    fn sample_count(&self, antialias: bool) -> u32 {
        if !antialias {
            return 1;
        }
        let flags = self.adapter.get_texture_format_features(self.config.format).flags;
        if flags.sample_count_supported(MSAA_SAMPLES) {
            MSAA_SAMPLES
        } else {
            tracing::warn!(
                samples = MSAA_SAMPLES,
                "multisampling not supported for surface format, antialiasing disabled"
            );
            1
        }
    }

    fn alpha_mode(&self, alpha: bool) -> wgpu::CompositeAlphaMode {
        let supported = self.surface.get_capabilities(&self.adapter).alpha_modes;
        if alpha {
            if let Some(mode) = [
                wgpu::CompositeAlphaMode::PreMultiplied,
                wgpu::CompositeAlphaMode::PostMultiplied,
            ]
            .into_iter()
            .find(|m| supported.contains(m))
            {
                return mode;
            }
            tracing::warn!("transparent surface not supported, presenting opaque");
        }
        supported
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

impl Renderer for SurfaceRenderer {
    fn configure(&mut self, options: &RendererOptions) -> Result<(), RenderError> {
        self.config.alpha_mode = self.alpha_mode(options.alpha);
        self.surface.configure(&self.device, &self.config);

        let sample_count = self.sample_count(options.antialias);
        let size = self.size();
        self.scene = Some(SceneRenderer::new(
            &self.device,
            self.config.format,
            size,
            sample_count,
        ));
        self.options = Some(*options);

        tracing::debug!(
            alpha_mode = ?self.config.alpha_mode,
            sample_count,
            shadow_map = options.shadow_map,
            "surface configured"
        );
        Ok(())
    }

    fn set_size(&mut self, size: ViewportSize) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        let size = self.size();
        if let Some(scene) = &mut self.scene {
            scene.resize(&self.device, size);
        }
    }

    fn size(&self) -> ViewportSize {
        ViewportSize::new(self.config.width, self.config.height)
    }

    fn render(
        &mut self,
        scene: &SceneGraph,
        camera: &PerspectiveCamera,
    ) -> Result<(), RenderError> {
        let (Some(options), Some(renderer)) = (self.options, self.scene.as_mut()) else {
            return Err(RenderError::NotConfigured);
        };

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(RenderError::Frame(e.to_string())),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let frame = FrameData::build(scene, camera, options.shadow_map);
        let clear = match (options.alpha, frame.fog_color) {
            (true, _) => wgpu::Color::TRANSPARENT,
            (false, Some([r, g, b])) => wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
            (false, None) => wgpu::Color::BLACK,
        };

        renderer.render(&self.device, &self.queue, &view, &frame, clear);
        output.present();
        Ok(())
    }
}
