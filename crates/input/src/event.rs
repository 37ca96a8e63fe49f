/// A raw event delivered by the host (window system or page).
///
/// The orchestrator consumes these; it never reads platform events directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to `(x, y)` in physical pixels from the top-left corner.
    PointerMoved { x: f32, y: f32 },
    /// The viewport changed size; the new size is read back from the host.
    Resized,
}

impl InputEvent {
    pub fn kind(&self) -> InputKind {
        match self {
            InputEvent::PointerMoved { .. } => InputKind::PointerMove,
            InputEvent::Resized => InputKind::Resize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    PointerMove,
    Resize,
}

/// Set of event kinds a consumer registered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Subscriptions {
    pointer_move: bool,
    resize: bool,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind. Returns false if it was already registered.
    pub fn insert(&mut self, kind: InputKind) -> bool {
        let slot = match kind {
            InputKind::PointerMove => &mut self.pointer_move,
            InputKind::Resize => &mut self.resize,
        };
        !std::mem::replace(slot, true)
    }

    pub fn contains(&self, kind: InputKind) -> bool {
        match kind {
            InputKind::PointerMove => self.pointer_move,
            InputKind::Resize => self.resize,
        }
    }

    pub fn accepts(&self, event: &InputEvent) -> bool {
        self.contains(event.kind())
    }

    pub fn is_empty(&self) -> bool {
        !self.pointer_move && !self.resize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kinds() {
        assert_eq!(
            InputEvent::PointerMoved { x: 1.0, y: 2.0 }.kind(),
            InputKind::PointerMove
        );
        assert_eq!(InputEvent::Resized.kind(), InputKind::Resize);
    }

    #[test]
    fn subscriptions_start_empty() {
        let subs = Subscriptions::new();
        assert!(subs.is_empty());
        assert!(!subs.accepts(&InputEvent::Resized));
    }

    #[test]
    fn insert_reports_first_registration_only() {
        let mut subs = Subscriptions::new();
        assert!(subs.insert(InputKind::Resize));
        assert!(!subs.insert(InputKind::Resize));
        assert!(subs.accepts(&InputEvent::Resized));
        assert!(!subs.contains(InputKind::PointerMove));
    }
}
