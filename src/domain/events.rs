//! Activity notifications emitted by the browser.
//!
//! Notifications are one-way: the sink receives them and nothing is returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::ResourceKind;

/// A resource tab was activated on a topic card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceActivated {
    /// When the tab was activated
    pub timestamp: DateTime<Utc>,

    /// Title of the unit the topic belongs to
    pub unit_title: String,

    /// Topic title
    pub topic: String,

    /// Kind of resource requested
    pub kind: ResourceKind,

    /// Request id of the load started by this activation
    pub request_id: u64,
}

impl ResourceActivated {
    /// Create a notification stamped with the current time
    pub fn new(
        unit_title: impl Into<String>,
        topic: impl Into<String>,
        kind: ResourceKind,
        request_id: u64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            unit_title: unit_title.into(),
            topic: topic.into(),
            kind,
            request_id,
        }
    }
}
