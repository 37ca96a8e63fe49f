use aviator_common::ViewportSize;
use aviator_input::InputKind;

/// Capabilities the embedding environment lends to the game.
///
/// A host is a browser page or a native window. Events themselves are
/// pushed into [`crate::Game::handle_event`] by the host's event loop.
pub trait Host {
    /// Current drawable size in physical pixels.
    fn viewport_size(&self) -> ViewportSize;

    /// Start delivering events of `kind`.
    fn subscribe(&mut self, kind: InputKind);

    /// Ask for [`crate::Game::frame_step`] to be called on the next display
    /// refresh.
    fn request_frame(&mut self);
}
