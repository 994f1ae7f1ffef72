//! Core browsing logic.
//!
//! This module contains:
//! - ResourceLocator: Remote URL construction
//! - TopicCard: Per-topic tab and load lifecycle
//! - Session: Grid/detail navigation and card ownership

pub mod card;
pub mod locator;
pub mod session;

// Re-export commonly used types
pub use card::{
    AssetLoadError, CompletionOutcome, LoadOutcome, LoadPolicy, LoadState, LoadTicket, TopicCard,
};
pub use locator::{encode_segment, ResourceLocator};
pub use session::{NavigationError, NavigationState, Session, SessionError};
