//! Window-less driver: runs the game loop against the text renderer.

use aviator_common::ViewportSize;
use aviator_game::{Game, GameConfig, GameError, Host};
use aviator_input::{InputKind, Subscriptions};
use aviator_render::DebugTextRenderer;

/// Host with a fixed viewport that records frame requests instead of
/// waiting for a display.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    size: ViewportSize,
    subscriptions: Subscriptions,
    frame_requested: bool,
}

impl HeadlessHost {
    pub fn new(size: ViewportSize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn subscriptions(&self) -> Subscriptions {
        self.subscriptions
    }

    /// Consume the outstanding frame request, if any.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

impl Host for HeadlessHost {
    fn viewport_size(&self) -> ViewportSize {
        self.size
    }

    fn subscribe(&mut self, kind: InputKind) {
        self.subscriptions.insert(kind);
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }
}

/// Initialize a game and step it for `frames` frames, then stop it.
pub fn run(
    config: GameConfig,
    size: ViewportSize,
    frames: u64,
) -> Result<Game<HeadlessHost, DebugTextRenderer>, GameError> {
    let mut game = Game::new(config, HeadlessHost::new(size), DebugTextRenderer::new())?;
    game.initialize()?;
    while game.frame_count() < frames && game.host_mut().take_frame_request() {
        game.frame_step()?;
    }
    game.shutdown();
    tracing::info!(frames = game.frame_count(), "headless run finished");
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviator_game::GameState;

    #[test]
    fn runs_the_requested_number_of_frames() {
        let game = run(GameConfig::default(), ViewportSize::new(640, 480), 5).unwrap();
        assert_eq!(game.frame_count(), 5);
        assert_eq!(game.renderer().frames(), 5);
        assert_eq!(game.state(), GameState::Stopped);
        assert!(game.host().subscriptions().contains(InputKind::PointerMove));
        assert!(game.renderer().last_frame().contains("640x480"));
    }

    #[test]
    fn zero_frames_only_initializes() {
        let game = run(GameConfig::default(), ViewportSize::new(640, 480), 0).unwrap();
        assert_eq!(game.frame_count(), 0);
        assert!(game.renderer().last_frame().is_empty());
    }
}
