//! Per-topic card state: expansion, active resource tab and load lifecycle.
//!
//! ```text
//! Idle --activate--> Loading --complete(ok)--> Ready
//!                       |  \--complete(err)--> Error
//!                       \----expire---------> Error(TimedOut)
//! Ready | Error --activate--> Loading
//! ```
//!
//! Every activation gets a fresh request id. A completion carries the
//! [`LoadTicket`] it was issued with and is applied only while that ticket is
//! still the card's current request.

use std::time::{Duration, Instant};

use thiserror::Error;

use super::locator::ResourceLocator;
use crate::adapters::{OpenError, Opener};
use crate::domain::ResourceKind;

/// Per-resource load failures (recoverable, contained in the card)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetLoadError {
    #[error("Resource unavailable at {url}: {reason}")]
    Unavailable { url: String, reason: String },

    #[error("Resource at {url} did not load within {seconds}s")]
    TimedOut { url: String, seconds: u64 },
}

/// Limits applied to resource loads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPolicy {
    /// Time after which a pending load is reported as failed (default: 30s)
    pub timeout: Duration,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Tag identifying one activation's load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub unit_number: u32,
    pub topic_index: usize,
    pub kind: ResourceKind,
    pub request_id: u64,
    pub url: String,
}

/// Result of a load as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(AssetLoadError),
}

impl From<Result<(), AssetLoadError>> for LoadOutcome {
    fn from(result: Result<(), AssetLoadError>) -> Self {
        match result {
            Ok(()) => LoadOutcome::Loaded,
            Err(e) => LoadOutcome::Failed(e),
        }
    }
}

/// Whether a completion changed the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Applied,
    Stale,
}

/// Load lifecycle of the active resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No tab activated yet
    Idle,

    /// Waiting for the platform to report the load
    Loading { started_at: Instant },

    /// Resource displayed
    Ready,

    /// Resource failed to load
    Error(AssetLoadError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading { .. })
    }

    /// Short lowercase label for display
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading { .. } => "loading",
            LoadState::Ready => "ready",
            LoadState::Error(_) => "error",
        }
    }
}

/// State of one topic card in the unit detail view
#[derive(Debug, Clone)]
pub struct TopicCard {
    unit_number: u32,
    unit_title: String,
    topic_index: usize,
    topic: String,
    is_expanded: bool,
    active_kind: ResourceKind,
    current_src: Option<String>,
    load_state: LoadState,
    current_request: Option<u64>,
}

impl TopicCard {
    /// Create a collapsed, idle card
    pub fn new(
        unit_number: u32,
        unit_title: impl Into<String>,
        topic_index: usize,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            unit_number,
            unit_title: unit_title.into(),
            topic_index,
            topic: topic.into(),
            is_expanded: false,
            active_kind: ResourceKind::default(),
            current_src: None,
            load_state: LoadState::Idle,
            current_request: None,
        }
    }

    pub fn unit_number(&self) -> u32 {
        self.unit_number
    }

    pub fn unit_title(&self) -> &str {
        &self.unit_title
    }

    pub fn topic_index(&self) -> usize {
        self.topic_index
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn active_kind(&self) -> ResourceKind {
        self.active_kind
    }

    pub fn current_src(&self) -> Option<&str> {
        self.current_src.as_deref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Request id of the load the card is waiting for (or last applied)
    pub fn current_request(&self) -> Option<u64> {
        self.current_request
    }

    /// Switch to `kind`, expand the card and start a new load
    pub fn activate(
        &mut self,
        kind: ResourceKind,
        locator: &ResourceLocator,
        request_id: u64,
        now: Instant,
    ) -> LoadTicket {
        let url = locator.locate(&self.unit_title, &self.topic, kind);

        if let Some(previous) = self.current_request.filter(|_| self.load_state.is_loading()) {
            tracing::debug!(
                topic = %self.topic,
                superseded = previous,
                request_id,
                "Superseding pending load"
            );
        }

        self.active_kind = kind;
        self.is_expanded = true;
        self.current_src = Some(url.clone());
        self.load_state = LoadState::Loading { started_at: now };
        self.current_request = Some(request_id);

        LoadTicket {
            unit_number: self.unit_number,
            topic_index: self.topic_index,
            kind,
            request_id,
            url,
        }
    }

    /// Apply a load completion, ignoring superseded tickets
    pub fn complete(&mut self, ticket: &LoadTicket, outcome: LoadOutcome) -> CompletionOutcome {
        let current = self.current_request == Some(ticket.request_id)
            && ticket.unit_number == self.unit_number
            && ticket.topic_index == self.topic_index
            && self.load_state.is_loading();

        if !current {
            tracing::warn!(
                topic = %self.topic,
                request_id = ticket.request_id,
                current = ?self.current_request,
                "Discarding stale load completion"
            );
            return CompletionOutcome::Stale;
        }

        self.load_state = match outcome {
            LoadOutcome::Loaded => LoadState::Ready,
            LoadOutcome::Failed(error) => {
                tracing::warn!(
                    topic = %self.topic,
                    kind = %ticket.kind,
                    error = %error,
                    "Resource failed to load"
                );
                LoadState::Error(error)
            }
        };

        CompletionOutcome::Applied
    }

    /// Flip the expanded flag (card header click)
    pub fn toggle_expanded(&mut self) -> bool {
        self.is_expanded = !self.is_expanded;
        self.is_expanded
    }

    /// Fail a load that has been pending for at least `timeout`
    ///
    /// Returns true if the card transitioned to `Error`.
    pub fn expire(&mut self, now: Instant, timeout: Duration) -> bool {
        let LoadState::Loading { started_at } = self.load_state else {
            return false;
        };

        if now.saturating_duration_since(started_at) < timeout {
            return false;
        }

        let url = self.current_src.clone().unwrap_or_default();
        tracing::warn!(topic = %self.topic, url = %url, "Resource load timed out");
        self.load_state = LoadState::Error(AssetLoadError::TimedOut {
            url,
            seconds: timeout.as_secs(),
        });
        true
    }

    /// Re-request the current document in a new browsing context
    ///
    /// Available for tutorial and question documents only. Never changes the
    /// load state.
    pub fn reopen_in_new_tab(&self, opener: &dyn Opener) -> Result<(), OpenError> {
        if !self.active_kind.is_document() {
            return Err(OpenError::NoFallback {
                kind: self.active_kind,
            });
        }

        let src = self.current_src.as_deref().ok_or(OpenError::NothingToOpen)?;
        opener.open(src)
    }

    /// User-facing message for a failed load
    pub fn diagnostic(&self) -> Option<String> {
        let LoadState::Error(error) = &self.load_state else {
            return None;
        };
        let src = self.current_src.as_deref().unwrap_or_default();

        let message = if self.active_kind.is_document() {
            format!(
                "Failed to load {}. There was an error loading this resource ({}). Try opening it in a new tab.",
                self.active_kind.viewer_title().to_lowercase(),
                error
            )
        } else {
            format!(
                "Failed to load video. Please check:\n• Network connection\n• File availability\n• URL: {}",
                src
            )
        };

        Some(message)
    }

    /// Heading for the inline viewer ("ER Modeling — Tutorial Notes")
    pub fn viewer_title(&self) -> Option<String> {
        self.current_src
            .as_ref()
            .map(|_| format!("{} — {}", self.topic, self.active_kind.viewer_title()))
    }
}
