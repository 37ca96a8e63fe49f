use aviator_common::ViewportSize;
use glam::Vec2;

/// Map a pixel position to normalized coordinates.
///
/// `x` grows to the right and `y` grows upward, both in `[-1, 1]` across the
/// viewport. Returns `None` for an empty viewport.
pub fn normalized_pointer(x_px: f32, y_px: f32, viewport: ViewportSize) -> Option<Vec2> {
    if viewport.is_empty() {
        return None;
    }
    let tx = -1.0 + (x_px / viewport.width as f32) * 2.0;
    let ty = 1.0 - (y_px / viewport.height as f32) * 2.0;
    Some(Vec2::new(tx, ty))
}

/// Latest normalized pointer position; `(0, 0)` until the first move.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    target: Vec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Replace the target from a pixel position. Returns false and keeps the
    /// previous target when the viewport is empty.
    pub fn on_pointer_move(&mut self, x_px: f32, y_px: f32, viewport: ViewportSize) -> bool {
        match normalized_pointer(x_px, y_px, viewport) {
            Some(target) => {
                self.target = target;
                true
            }
            None => {
                tracing::trace!(x_px, y_px, "pointer ignored on empty viewport");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: ViewportSize = ViewportSize::new(800, 600);

    #[test]
    fn center_maps_to_origin() {
        assert_eq!(normalized_pointer(400.0, 300.0, VIEW), Some(Vec2::ZERO));
    }

    #[test]
    fn top_left_maps_to_minus_one_plus_one() {
        assert_eq!(normalized_pointer(0.0, 0.0, VIEW), Some(Vec2::new(-1.0, 1.0)));
    }

    #[test]
    fn bottom_right_maps_to_plus_one_minus_one() {
        assert_eq!(normalized_pointer(800.0, 600.0, VIEW), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn empty_viewport_is_rejected() {
        assert_eq!(normalized_pointer(1.0, 1.0, ViewportSize::new(0, 600)), None);
    }

    #[test]
    fn tracker_defaults_to_origin_and_replaces_wholesale() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.target(), Vec2::ZERO);
        assert!(tracker.on_pointer_move(0.0, 600.0, VIEW));
        assert_eq!(tracker.target(), Vec2::new(-1.0, -1.0));
        assert!(!tracker.on_pointer_move(5.0, 5.0, ViewportSize::default()));
        assert_eq!(tracker.target(), Vec2::new(-1.0, -1.0));
    }
}
