//! syllabus - Curriculum resource browser
//!
//! Browses a static curriculum (units → topics → resources) whose video,
//! tutorial and question resources live on a remote object store.
//!
//! # Architecture
//!
//! The browser is a small state machine owned by a single [`Session`]:
//! - The view is either the unit grid or one unit's detail view
//! - Each topic card tracks its active resource tab and load state
//! - Loads are tagged with request ids so superseded completions are dropped
//!
//! # Modules
//!
//! - `adapters`: Host platform seams (activity sink, browser opener, HTTP probe)
//! - `core`: Resource locator, topic cards and the browsing session
//! - `domain`: Data structures (Curriculum, Unit, ResourceKind, events)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List units
//! syllabus units
//!
//! # Print the tutorial URL of topic 2 in unit 1
//! syllabus locate 1 2 --kind tutorial
//!
//! # Check every resource of unit 3
//! syllabus check 3
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::core::{LoadOutcome, LoadState, LoadTicket, ResourceLocator, Session, TopicCard};
pub use crate::domain::{Curriculum, DataLoadError, ResourceKind, Unit};
