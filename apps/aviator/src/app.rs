use crate::host::WinitHost;
use aviator_common::ViewportSize;
use aviator_game::{Game, GameConfig, GameError, MOUNT_ELEMENT_ID};
use aviator_input::InputEvent;
#[cfg(not(target_arch = "wasm32"))]
use aviator_input::InputKind;
use aviator_render::RenderError;
use aviator_render_wgpu::SurfaceRenderer;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

type WindowGame = Game<WinitHost, SurfaceRenderer>;

/// Events posted back into the loop from async work.
pub enum AppEvent {
    /// The GPU surface finished initializing (async on the web).
    RendererReady(Result<SurfaceRenderer, RenderError>),
    /// Page-level input captured outside winit (web only).
    Input(InputEvent),
}

pub struct App {
    config: GameConfig,
    proxy: EventLoopProxy<AppEvent>,
    window: Option<Arc<Window>>,
    game: Option<WindowGame>,
}

impl App {
    pub fn new(config: GameConfig, proxy: EventLoopProxy<AppEvent>) -> Self {
        Self {
            config,
            proxy,
            window: None,
            game: None,
        }
    }

    fn start_game(
        &mut self,
        event_loop: &ActiveEventLoop,
        renderer: Result<SurfaceRenderer, RenderError>,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        #[cfg(target_arch = "wasm32")]
        let host = WinitHost::new(window, self.proxy.clone());
        #[cfg(not(target_arch = "wasm32"))]
        let host = WinitHost::new(window);
        let started = renderer.map_err(GameError::from).and_then(|renderer| {
            let mut game = Game::new(self.config.clone(), host, renderer)?;
            game.initialize()?;
            Ok(game)
        });
        match started {
            Ok(game) => self.game = Some(game),
            Err(e) => {
                tracing::error!("failed to start: {e}");
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Aviator")
            .with_inner_size(winit::dpi::PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        #[cfg(target_arch = "wasm32")]
        if let Err(e) = mount_canvas(&window) {
            tracing::error!("{e}");
            event_loop.exit();
            return;
        }

        self.window = Some(window.clone());
        let size = window.inner_size();
        let size = ViewportSize::new(size.width, size.height);

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let renderer = SurfaceRenderer::new(window, size).await;
                if proxy.send_event(AppEvent::RendererReady(renderer)).is_err() {
                    tracing::warn!("event loop closed before the renderer was ready");
                }
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let renderer = pollster::block_on(SurfaceRenderer::new(window, size));
            if self.proxy.send_event(AppEvent::RendererReady(renderer)).is_err() {
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::RendererReady(renderer) => self.start_game(event_loop, renderer),
            AppEvent::Input(input) => {
                if let Some(game) = &mut self.game {
                    game.handle_event(input);
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(game) = &mut self.game else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                game.shutdown();
                event_loop.exit();
            }
            // On the web these arrive as page listener events instead.
            #[cfg(not(target_arch = "wasm32"))]
            WindowEvent::Resized(_) if game.host().is_subscribed(InputKind::Resize) => {
                game.handle_event(InputEvent::Resized);
            }
            #[cfg(not(target_arch = "wasm32"))]
            WindowEvent::CursorMoved { position, .. }
                if game.host().is_subscribed(InputKind::PointerMove) =>
            {
                game.handle_event(InputEvent::PointerMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = game.on_redraw() {
                    tracing::error!(frame = game.frame_count(), "frame failed: {e}");
                    if !game.frame_pending() {
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }
}

/// Look up the mount element by its id.
pub fn find_container<E>(lookup: impl FnOnce(&str) -> Option<E>) -> Result<E, GameError> {
    lookup(MOUNT_ELEMENT_ID)
        .ok_or_else(|| GameError::MissingContainer(MOUNT_ELEMENT_ID.to_string()))
}

/// Append the window's canvas to the `#world` element and let it fill it.
#[cfg(target_arch = "wasm32")]
fn mount_canvas(window: &Window) -> Result<(), GameError> {
    use winit::platform::web::WindowExtWebSys;

    let missing = || GameError::MissingContainer(MOUNT_ELEMENT_ID.to_string());
    let document = web_sys::window().and_then(|w| w.document());
    let container = find_container(|id| document.and_then(|d| d.get_element_by_id(id)))?;
    let canvas = window.canvas().ok_or_else(missing)?;

    let style = canvas.style();
    for property in ["width", "height"] {
        if let Err(e) = style.set_property(property, "100%") {
            tracing::warn!(property, "failed to size canvas: {e:?}");
        }
    }
    container.append_child(&canvas).map_err(|_| missing())?;
    tracing::info!(container = MOUNT_ELEMENT_ID, "canvas mounted");
    Ok(())
}

/// Create the event loop and run the app until the window closes.
pub fn run(config: GameConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    let app = App::new(config, event_loop.create_proxy());

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::EventLoopExtWebSys;
        event_loop.spawn_app(app);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut app = app;
        event_loop.run_app(&mut app)?;
    }
    Ok(())
}
