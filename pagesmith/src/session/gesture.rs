//! Direct-manipulation gestures.
//!
//! Two independent protocols live here:
//!
//! - [`ReorderEngine`] turns a drag sequence (start, over, drop) into a
//!   positional swap in a [`SourceRegistry`].
//! - [`SwipeTracker`] turns a leftward touch swipe into a selection toggle.
//!   A swipe never reorders anything.
//!
//! Neither type knows about a concrete input API; callers translate their
//! platform events into [`DragEvent`] values and touch coordinates.

use crate::error::Result;
use crate::source::SourceRegistry;

/// Input events of a drag sequence, addressed by registry position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// The user picked up the element at `index`.
    Start {
        /// Position being dragged.
        index: usize,
    },
    /// The dragged element hovers over `index`.
    Over {
        /// Candidate drop position.
        index: usize,
    },
    /// The dragged element was released over `index`.
    Drop {
        /// Drop position.
        index: usize,
    },
    /// The drag ended without a drop (released outside, or cancelled).
    End,
}

/// Current state of the drag protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// An element is being dragged.
    Dragging {
        /// Position captured at drag start.
        source: usize,
    },
}

/// What a single [`DragEvent`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// A drag began.
    Started {
        /// Captured source position.
        source: usize,
    },
    /// Hovering target accepts a drop. Nothing changed.
    DropAllowed {
        /// Hovered position.
        target: usize,
    },
    /// The registry swapped two positions.
    Reordered {
        /// Source position.
        from: usize,
        /// Target position.
        to: usize,
    },
    /// The drag ended without a drop; nothing changed.
    Cancelled,
    /// The event did not apply to the current state.
    Ignored,
}

/// Drag-and-drop state machine over a [`SourceRegistry`].
///
/// `Idle -> Dragging(source) -> Idle`. A drop commits
/// `registry.reorder(source, target)`; an end without a drop commits
/// nothing. Whatever happens on drop, the engine is idle afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReorderEngine {
    state: DragState,
}

impl ReorderEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current protocol state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Check if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Feed one event into the state machine.
    ///
    /// # Errors
    ///
    /// A drop onto a position the registry does not have fails with
    /// [`PositionOutOfRange`](crate::PageSmithError::PositionOutOfRange).
    /// The registry is unchanged and the engine is idle again.
    pub fn handle(
        &mut self,
        event: DragEvent,
        registry: &mut SourceRegistry,
    ) -> Result<DragOutcome> {
        let outcome = match (event, self.state) {
            (DragEvent::Start { index }, _) => {
                self.state = DragState::Dragging { source: index };
                DragOutcome::Started { source: index }
            }
            // Hovering always permits a drop, even outside a drag.
            (DragEvent::Over { index }, _) => DragOutcome::DropAllowed { target: index },
            (DragEvent::Drop { index }, DragState::Dragging { source }) => {
                self.state = DragState::Idle;
                registry.reorder(source, index)?;
                DragOutcome::Reordered {
                    from: source,
                    to: index,
                }
            }
            (DragEvent::Drop { .. }, DragState::Idle) => DragOutcome::Ignored,
            (DragEvent::End, DragState::Dragging { .. }) => {
                self.state = DragState::Idle;
                DragOutcome::Cancelled
            }
            (DragEvent::End, DragState::Idle) => DragOutcome::Ignored,
        };

        tracing::trace!(?event, ?outcome, "drag event handled");
        Ok(outcome)
    }

    /// Abandon any drag in progress.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Recognizes leftward swipes on review elements.
///
/// A swipe is recorded per element: the start coordinate only counts when the
/// touch ends on the same element it started on.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<(usize, f32)>,
}

impl SwipeTracker {
    /// Create a tracker that fires when the leftward displacement exceeds `threshold`.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    /// Minimum leftward displacement that counts as a swipe.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Record where a touch began on element `index`.
    pub fn touch_start(&mut self, index: usize, x: f32) {
        self.start = Some((index, x));
    }

    /// Finish a touch on element `index` at horizontal coordinate `x`.
    ///
    /// Returns the element to toggle when the touch moved left by more than
    /// the threshold. The recorded start is consumed either way.
    pub fn touch_end(&mut self, index: usize, x: f32) -> Option<usize> {
        let (start_index, start_x) = self.start.take()?;
        let displacement = start_x - x;
        if start_index == index && displacement > self.threshold {
            tracing::trace!(index, displacement, "swipe recognized");
            Some(index)
        } else {
            None
        }
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SWIPE_THRESHOLD)
    }
}
