use crate::config::ConfigError;
use aviator_render::RenderError;
use aviator_scene::SceneError;

/// Errors surfaced by the orchestrator and its hosts.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("game is already initialized")]
    AlreadyInitialized,
    #[error("game is not initialized")]
    NotInitialized,
    #[error("mount container #{0} not found")]
    MissingContainer(String),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
