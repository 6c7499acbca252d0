//! Nimbus Tab Management
//!
//! Owns the set of live browsing sessions (frames), their ordinals,
//! which one is focused, and the address bar value. Reacts to frame
//! navigation completion by updating history and the address bar, and
//! fans lifecycle notifications out to subscribers.

mod error;
mod events;
mod frame;
mod manager;
mod state;
mod tab;

pub use error::TabError;
pub use events::TabEvent;
pub use frame::{Frame, FrameHost};
pub use manager::{TabManager, NEW_TAB_ADDRESS};
pub use state::TabState;
pub use tab::Tab;

pub type Result<T> = std::result::Result<T, TabError>;
