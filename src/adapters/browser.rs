//! Opener backed by the operating system's default browser.

use super::{OpenError, Opener};

/// Opens URLs with the system handler (`open` crate)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        open::that(url).map_err(|e| {
            tracing::warn!(url, error = %e, "Failed to open browser");
            launch_failed(url, &e)
        })
    }
}

/// Map a launch failure to the blocked-popup error
///
/// The system handler cannot tell a refused window from a missing browser, so
/// the reason names both.
fn launch_failed(url: &str, error: &std::io::Error) -> OpenError {
    OpenError::PopupBlocked {
        url: url.to_string(),
        reason: format!("no browser window could be opened: {}", error),
    }
}
