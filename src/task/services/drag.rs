//! Presentation state of an in-progress drag gesture.

use super::TaskCard;
use crate::task::domain::{MoveIntent, TaskDomainError, TaskStatus};

/// Tracks the dragged card and the lane it hovers over.
///
/// Only the drop itself changes the store, through
/// [`super::TaskBoardService::drop_intent`]; everything here is reversible
/// presentation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragTracker {
    active: Option<MoveIntent>,
    hovered: Option<TaskStatus>,
}

impl DragTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts dragging `card` and returns the payload to hand to the drag
    /// source.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MalformedMoveIntent`] if the intent cannot
    /// be encoded.
    pub fn start(&mut self, card: &TaskCard) -> Result<String, TaskDomainError> {
        let intent = card.move_intent();
        let payload = intent.to_payload()?;
        self.active = Some(intent);
        Ok(payload)
    }

    /// Highlights `lane` as the drop target.
    pub const fn enter(&mut self, lane: TaskStatus) {
        self.hovered = Some(lane);
    }

    /// Clears the highlight when the pointer leaves `lane`.
    ///
    /// Leaving a lane that is not highlighted does nothing, so late leave
    /// events after entering a neighbour keep the neighbour highlighted.
    pub fn leave(&mut self, lane: TaskStatus) {
        if self.hovered == Some(lane) {
            self.hovered = None;
        }
    }

    /// Returns the highlighted lane.
    #[must_use]
    pub const fn hovered(&self) -> Option<TaskStatus> {
        self.hovered
    }

    /// Returns the intent being dragged.
    #[must_use]
    pub const fn active(&self) -> Option<&MoveIntent> {
        self.active.as_ref()
    }

    /// Ends the gesture, on drop or cancel, and returns the dragged intent.
    pub const fn finish(&mut self) -> Option<MoveIntent> {
        self.hovered = None;
        self.active.take()
    }
}
