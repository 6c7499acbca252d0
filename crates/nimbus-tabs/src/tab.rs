//! Tab data structure

use crate::error::TabError;
use crate::frame::Frame;
use crate::state::TabState;
use crate::Result;

/// One isolated browsing session. Ordinals are assigned at creation,
/// strictly increasing, and never reused within a process lifetime.
pub struct Tab {
    pub ordinal: u64,
    /// Exclusively owned rendering surface
    pub(crate) frame: Box<dyn Frame>,
    pub state: TabState,
    /// Last title observed on navigation completion
    pub title: String,
}

impl Tab {
    pub(crate) fn new(ordinal: u64, frame: Box<dyn Frame>) -> Self {
        Self {
            ordinal,
            frame,
            state: TabState::Created,
            title: String::new(),
        }
    }

    /// Attempt to transition to a new state
    pub fn transition_to(&mut self, new_state: TabState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(TabError::InvalidTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }

        tracing::debug!(
            ordinal = self.ordinal,
            from = %self.state,
            to = %new_state,
            "Tab state transition"
        );

        self.state = new_state;
        Ok(())
    }

    /// Bring the tab to the foreground
    pub fn focus(&mut self) -> Result<()> {
        self.transition_to(TabState::Focused)
    }

    /// Demote the tab behind another focused one
    pub fn background(&mut self) -> Result<()> {
        if self.state == TabState::Focused {
            self.transition_to(TabState::Backgrounded)
        } else {
            Ok(()) // Already not focused
        }
    }

    /// Mark the tab closed. Terminal.
    pub fn close(&mut self) -> Result<()> {
        self.transition_to(TabState::Closed)
    }
}
