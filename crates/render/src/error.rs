/// Errors surfaced by renderer backends.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no graphics adapter supports this surface: {0}")]
    UnsupportedBackend(String),
    #[error("failed to create surface: {0}")]
    Surface(String),
    #[error("failed to acquire device: {0}")]
    Device(String),
    #[error("surface frame unavailable: {0}")]
    Frame(String),
    #[error("renderer used before configure()")]
    NotConfigured,
}
