//! Adapter interfaces for the host platform.
//!
//! The browser core never talks to the outside world directly. It goes through
//! three seams:
//! - [`ActivitySink`]: one-way activity notifications (log call)
//! - [`Opener`]: opens a URL in a new browsing context
//! - [`AssetProbe`]: observes whether a remote resource loads

pub mod browser;
pub mod http;
pub mod sink;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::AssetLoadError;
use crate::domain::{ResourceActivated, ResourceKind};

pub use browser::SystemOpener;
pub use http::HttpProbe;
pub use sink::TracingSink;

/// Message shown when the platform refuses to open a new browsing context
pub const POPUP_BLOCKED_MESSAGE: &str =
    "Popup blocked! Please allow popups for this site or try the download option.";

/// Failures when opening a resource outside the inline viewer
#[derive(Debug, Clone, Error)]
pub enum OpenError {
    #[error("{message} ({reason})", message = POPUP_BLOCKED_MESSAGE)]
    PopupBlocked { url: String, reason: String },

    #[error("No new-tab fallback for {kind} resources")]
    NoFallback { kind: ResourceKind },

    #[error("No resource has been activated on this topic")]
    NothingToOpen,
}

/// Receiver of activity notifications
///
/// Implementations must not block and cannot fail the caller.
pub trait ActivitySink: Send + Sync {
    fn resource_activated(&self, event: &ResourceActivated);
}

/// Opens URLs in a new browsing context
pub trait Opener: Send + Sync {
    /// Open `url`, reporting failure synchronously
    fn open(&self, url: &str) -> Result<(), OpenError>;
}

/// Observes whether a remote resource can be loaded
#[async_trait]
pub trait AssetProbe: Send + Sync {
    /// Human-readable probe name
    fn name(&self) -> &str;

    /// Resolve once the resource has loaded or failed, bounded by `timeout`
    async fn probe(&self, url: &str, timeout: Duration) -> Result<(), AssetLoadError>;
}
