//! Turns pointer drags and arrow keys into swipe directions.

use serde::Serialize;

use crate::model::SwipeDirection;

/// Keys the arena reacts to. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    #[must_use]
    pub fn direction(self) -> Option<SwipeDirection> {
        match self {
            Key::ArrowLeft => Some(SwipeDirection::Left),
            Key::ArrowRight => Some(SwipeDirection::Right),
            Key::Other => None,
        }
    }
}

/// What a pointer release resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Released at or past the drag threshold.
    Answer(SwipeDirection),
    /// Released short of the threshold; the card springs back.
    Cancelled,
    /// No drag was in progress.
    Ignored,
}

/// Live drag feedback for the active card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    pub is_dragging: bool,
    pub start_x: f64,
    pub offset: f64,
    pub preview: Option<SwipeDirection>,
}

impl DragState {
    #[must_use]
    pub fn rest() -> Self {
        Self::default()
    }

    /// Card thrown off-screen toward `direction` once an answer is registered.
    #[must_use]
    pub fn fly_out(direction: SwipeDirection, distance: f64) -> Self {
        Self {
            is_dragging: false,
            start_x: 0.0,
            offset: direction.sign() * distance,
            preview: Some(direction),
        }
    }
}

/// Tracks one pointer drag at a time.
///
/// Callers gate every method on the session accepting input; the tracker
/// itself only knows about distances.
#[derive(Debug, Clone, PartialEq)]
pub struct DragTracker {
    state: DragState,
    commit_threshold: f64,
    preview_threshold: f64,
}

impl DragTracker {
    #[must_use]
    pub fn new(commit_threshold: f64, preview_threshold: f64) -> Self {
        Self {
            state: DragState::rest(),
            commit_threshold,
            preview_threshold,
        }
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.state = DragState {
            is_dragging: true,
            start_x: x,
            offset: 0.0,
            preview: None,
        };
    }

    /// Updates the offset and returns the side the card currently leans toward.
    pub fn pointer_move(&mut self, x: f64) -> Option<SwipeDirection> {
        if !self.state.is_dragging {
            return None;
        }
        let offset = x - self.state.start_x;
        self.state.offset = offset;
        self.state.preview = if offset.abs() > self.preview_threshold {
            SwipeDirection::from_offset(offset)
        } else {
            None
        };
        self.state.preview
    }

    /// Resolves the drag. A cancelled drag returns to rest; an answered one is
    /// left for the caller to replace with a fly-out.
    pub fn pointer_up(&mut self) -> GestureOutcome {
        if !self.state.is_dragging {
            return GestureOutcome::Ignored;
        }
        let offset = self.state.offset;
        if offset.abs() >= self.commit_threshold {
            if let Some(direction) = SwipeDirection::from_offset(offset) {
                self.state.is_dragging = false;
                return GestureOutcome::Answer(direction);
            }
        }
        self.state = DragState::rest();
        GestureOutcome::Cancelled
    }

    pub fn fly_out(&mut self, direction: SwipeDirection, distance: f64) {
        self.state = DragState::fly_out(direction, distance);
    }

    pub fn reset(&mut self) {
        self.state = DragState::rest();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> DragTracker {
        DragTracker::new(120.0, 60.0)
    }

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(Key::ArrowLeft.direction(), Some(SwipeDirection::Left));
        assert_eq!(Key::ArrowRight.direction(), Some(SwipeDirection::Right));
        assert_eq!(Key::Other.direction(), None);
    }

    #[test]
    fn short_drag_cancels_back_to_rest() {
        let mut t = tracker();
        t.pointer_down(300.0);
        t.pointer_move(350.0);
        assert_eq!(t.pointer_up(), GestureOutcome::Cancelled);
        assert_eq!(t.state(), DragState::rest());
    }

    #[test]
    fn drag_at_threshold_answers() {
        let mut t = tracker();
        t.pointer_down(300.0);
        t.pointer_move(420.0);
        assert_eq!(t.pointer_up(), GestureOutcome::Answer(SwipeDirection::Right));

        t.pointer_down(300.0);
        t.pointer_move(100.0);
        assert_eq!(t.pointer_up(), GestureOutcome::Answer(SwipeDirection::Left));
    }

    #[test]
    fn preview_follows_offset_past_preview_threshold() {
        let mut t = tracker();
        t.pointer_down(0.0);
        assert_eq!(t.pointer_move(60.0), None);
        assert_eq!(t.pointer_move(61.0), Some(SwipeDirection::Right));
        assert_eq!(t.pointer_move(-80.0), Some(SwipeDirection::Left));
        assert_eq!(t.pointer_move(10.0), None);
        assert!(t.is_dragging());
    }

    #[test]
    fn move_and_up_without_down_are_ignored() {
        let mut t = tracker();
        assert_eq!(t.pointer_move(500.0), None);
        assert_eq!(t.pointer_up(), GestureOutcome::Ignored);
        assert_eq!(t.state().offset, 0.0);
    }

    #[test]
    fn fly_out_points_toward_answer() {
        let mut t = tracker();
        t.fly_out(SwipeDirection::Left, 520.0);
        assert_eq!(t.state().offset, -520.0);
        assert_eq!(t.state().preview, Some(SwipeDirection::Left));
        t.reset();
        assert_eq!(t.state(), DragState::rest());
    }
}
