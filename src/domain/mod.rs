//! Domain types for the curriculum browser.
//!
//! This module contains the core data structures:
//! - Curriculum: Subject, units and topics loaded from static data
//! - ResourceKind: Video, tutorial and question resources
//! - Events: Activity notifications

pub mod curriculum;
pub mod events;
pub mod resource;

// Re-export commonly used types
pub use curriculum::{unit_icon, Curriculum, DataLoadError, Unit};
pub use events::ResourceActivated;
pub use resource::ResourceKind;
