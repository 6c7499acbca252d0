//! Tab State Machine
//!
//! ```text
//! Created
//!   ↓ focus
//! Focused ⇄ Backgrounded
//!   ↓ close      ↓ close
//!      Closed (terminal)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabState {
    /// Frame exists but has not been shown yet
    Created,
    /// Tab is currently visible; its location drives the address bar
    Focused,
    /// Tab is live but hidden
    Backgrounded,
    /// Tab has been removed from the live set. Terminal.
    Closed,
}

impl TabState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: TabState) -> bool {
        match (self, target) {
            // A fresh tab is focused immediately
            (TabState::Created, TabState::Focused) => true,
            // Focus moves back and forth
            (TabState::Focused, TabState::Backgrounded) => true,
            (TabState::Backgrounded, TabState::Focused) => true,
            // Close from either live state
            (TabState::Focused, TabState::Closed) => true,
            (TabState::Backgrounded, TabState::Closed) => true,
            // Same state is always valid (no-op)
            (a, b) if *a == b => true,
            // Closed is terminal; everything else is invalid
            _ => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, TabState::Closed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabState::Created => "created",
            TabState::Focused => "focused",
            TabState::Backgrounded => "backgrounded",
            TabState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for TabState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
