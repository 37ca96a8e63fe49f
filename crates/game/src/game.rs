use crate::config::GameConfig;
use crate::error::GameError;
use crate::host::Host;
use crate::lights::LightRig;
use aviator_common::{ViewportSize, ease_toward, normalize};
use aviator_entities::{Airplane, Sea, Sky};
use aviator_input::{InputEvent, InputKind, PointerTracker, Subscriptions};
use aviator_render::{PerspectiveCamera, Renderer, RendererOptions};
use aviator_scene::{Fog, SceneGraph};
use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Lifecycle of a [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Uninitialized,
    Running,
    Stopped,
}

/// Entities created by `initialize`.
#[derive(Debug)]
struct Entities {
    sea: Sea,
    sky: Sky,
    airplane: Airplane,
    lights: LightRig,
}

/// The scene orchestrator.
///
/// Owns the scene graph, camera, renderer and host exclusively. Entities
/// only hold node ids into the graph.
pub struct Game<H: Host, R: Renderer> {
    config: GameConfig,
    host: H,
    renderer: R,
    scene: SceneGraph,
    camera: PerspectiveCamera,
    viewport: ViewportSize,
    pointer: PointerTracker,
    subscriptions: Subscriptions,
    entities: Option<Entities>,
    state: GameState,
    frame_pending: bool,
    frames: u64,
}

impl<H: Host, R: Renderer> Game<H, R> {
    pub fn new(config: GameConfig, host: H, renderer: R) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            host,
            renderer,
            scene: SceneGraph::new(),
            camera: PerspectiveCamera::default(),
            viewport: ViewportSize::default(),
            pointer: PointerTracker::new(),
            subscriptions: Subscriptions::new(),
            entities: None,
            state: GameState::Uninitialized,
            frame_pending: false,
            frames: 0,
        })
    }

    /// Build the scene, configure the renderer and request the first frame.
    pub fn initialize(&mut self) -> Result<(), GameError> {
        if self.state != GameState::Uninitialized {
            return Err(GameError::AlreadyInitialized);
        }

        let viewport = self.host.viewport_size();
        let cam = &self.config.camera;
        let aspect = if viewport.is_empty() {
            PerspectiveCamera::default().aspect
        } else {
            viewport.aspect()
        };
        self.camera = PerspectiveCamera::new(cam.fov_degrees, aspect, cam.near, cam.far)
            .with_position(cam.position);

        self.renderer.configure(&RendererOptions {
            alpha: true,
            antialias: true,
            shadow_map: true,
        })?;
        self.renderer.set_size(viewport);
        self.viewport = viewport;

        let fog = &self.config.fog;
        if fog.enabled {
            self.scene.set_fog(Some(Fog {
                color: fog.color,
                near: fog.near,
                far: fog.far,
            }));
        }
        let lights = LightRig::spawn(&mut self.scene, &self.config.lights);

        let placement = self.config.placement;
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let sea = Sea::spawn(&mut self.scene, &mut rng);
        self.scene.transform_mut(sea.mesh)?.position.y = placement.sea_y;

        let sky = Sky::spawn(&mut self.scene, &mut rng)?;
        self.scene.transform_mut(sky.mesh)?.position.y = placement.sky_y;

        let airplane = Airplane::spawn(&mut self.scene)?;
        let t = self.scene.transform_mut(airplane.mesh)?;
        t.position.y = placement.airplane_y;
        t.scale = Vec3::splat(placement.airplane_scale);

        self.entities = Some(Entities {
            sea,
            sky,
            airplane,
            lights,
        });

        for kind in [InputKind::Resize, InputKind::PointerMove] {
            if self.subscriptions.insert(kind) {
                self.host.subscribe(kind);
            }
        }

        self.state = GameState::Running;
        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            nodes = self.scene.len(),
            "game initialized"
        );
        self.request_next_frame();
        Ok(())
    }

    /// Follow the host viewport: renderer size, camera aspect and projection.
    ///
    /// An empty viewport (a minimized window) keeps the last valid size.
    pub fn on_resize(&mut self) {
        let size = self.host.viewport_size();
        if size == self.viewport {
            return;
        }
        if size.is_empty() {
            tracing::debug!(width = size.width, height = size.height, "empty viewport ignored");
            return;
        }
        self.viewport = size;
        self.renderer.set_size(size);
        self.camera.fit_viewport(size);
        tracing::debug!(width = size.width, height = size.height, "viewport resized");
    }

    /// Record the pointer position, normalized against the current viewport.
    pub fn on_pointer_move(&mut self, x_px: f32, y_px: f32) {
        self.pointer.on_pointer_move(x_px, y_px, self.viewport);
    }

    /// Route a host event to its handler if that kind was subscribed.
    pub fn handle_event(&mut self, event: InputEvent) {
        if !self.subscriptions.accepts(&event) {
            tracing::trace!(?event, "unsubscribed event dropped");
            return;
        }
        match event {
            InputEvent::PointerMoved { x, y } => self.on_pointer_move(x, y),
            InputEvent::Resized => self.on_resize(),
        }
    }

    /// Steer the airplane toward the pointer target.
    ///
    /// X snaps to the target; Y eases toward it, and the remaining vertical
    /// distance sets roll and pitch.
    pub fn update_airplane(&mut self) -> Result<(), GameError> {
        let entities = self.entities.as_mut().ok_or(GameError::NotInitialized)?;
        let motion = &self.config.motion;
        let pointer = self.pointer.target();

        let target_x = normalize(pointer.x, -1.0, 1.0, motion.x_range[0], motion.x_range[1]);
        let target_y = normalize(pointer.y, -1.0, 1.0, motion.y_range[0], motion.y_range[1]);

        let t = self.scene.transform_mut(entities.airplane.mesh)?;
        t.position.y = ease_toward(t.position.y, target_y, motion.easing);
        t.position.x = target_x;
        t.rotation.z = (target_y - t.position.y) * motion.roll_factor;
        t.rotation.x = (t.position.y - target_y) * motion.pitch_factor;

        entities
            .airplane
            .spin_propeller(&mut self.scene, motion.propeller_spin)?;
        entities.airplane.update_hairs(&mut self.scene)?;
        Ok(())
    }

    /// Advance and render one frame, then schedule the next.
    ///
    /// A render failure is returned after the next frame is already
    /// scheduled, so a transient surface error does not end the loop.
    pub fn frame_step(&mut self) -> Result<(), GameError> {
        match self.state {
            GameState::Uninitialized => return Err(GameError::NotInitialized),
            GameState::Stopped => return Ok(()),
            GameState::Running => {}
        }
        self.frame_pending = false;

        let motion = self.config.motion;
        let entities = self.entities.as_ref().ok_or(GameError::NotInitialized)?;
        let (sea, sky) = (entities.sea.mesh, entities.sky.mesh);
        self.scene.transform_mut(sea)?.rotation.z += motion.sea_spin;
        self.scene.transform_mut(sky)?.rotation.z += motion.sky_spin;

        self.update_airplane()?;

        if let Some(entities) = self.entities.as_mut() {
            entities.sea.move_waves(&mut self.scene)?;
        }

        let rendered = self.renderer.render(&self.scene, &self.camera);
        self.frames += 1;
        self.request_next_frame();

        if let Err(e) = &rendered {
            tracing::warn!(frame = self.frames, "frame render failed: {e}");
        }
        rendered.map_err(GameError::from)
    }

    /// Run the requested frame, if one is outstanding.
    ///
    /// Returns whether a frame was stepped. Redraws nobody asked for, or
    /// that arrive before `initialize` or after `shutdown`, are skipped.
    pub fn on_redraw(&mut self) -> Result<bool, GameError> {
        if !self.frame_pending {
            tracing::trace!("unrequested redraw skipped");
            return Ok(false);
        }
        self.frame_step().map(|()| true)
    }

    /// Stop the loop. Pending frame callbacks become no-ops.
    pub fn shutdown(&mut self) {
        if self.state == GameState::Stopped {
            return;
        }
        self.state = GameState::Stopped;
        self.frame_pending = false;
        tracing::info!(frames = self.frames, "game stopped");
    }

    fn request_next_frame(&mut self) {
        if self.state != GameState::Running || self.frame_pending {
            return;
        }
        self.frame_pending = true;
        self.host.request_frame();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Normalized pointer target in `[-1, 1]²`.
    pub fn pointer(&self) -> Vec2 {
        self.pointer.target()
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    /// Whether a next-frame request is outstanding.
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Number of frames rendered (successfully or not).
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn sea(&self) -> Option<&Sea> {
        self.entities.as_ref().map(|e| &e.sea)
    }

    pub fn sky(&self) -> Option<&Sky> {
        self.entities.as_ref().map(|e| &e.sky)
    }

    pub fn airplane(&self) -> Option<&Airplane> {
        self.entities.as_ref().map(|e| &e.airplane)
    }

    pub fn lights(&self) -> Option<&LightRig> {
        self.entities.as_ref().map(|e| &e.lights)
    }
}
