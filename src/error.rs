use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort an audit run.
///
/// Expected absences (an anchor that is no longer on the page, a page without
/// a navigation menu) are not errors; the phases handle them in-line.
#[derive(Debug, Error)]
pub enum AuditError {
    /// No WebDriver session could be created
    #[error("failed to start WebDriver session: {0}")]
    Connect(#[from] fantoccini::error::NewSessionError),

    /// A WebDriver command failed (navigation, element interaction, script)
    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    /// A bounded wait expired
    #[error("timed out after {after:?} waiting for {waiting_for}")]
    Timeout {
        waiting_for: String,
        after: Duration,
    },

    /// Reading or writing an artifact failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed links file or configuration
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An exclude pattern did not compile
    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AuditError {
    /// Wraps an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AuditError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn timeout(waiting_for: impl Into<String>, after: Duration) -> Self {
        AuditError::Timeout {
            waiting_for: waiting_for.into(),
            after,
        }
    }

    /// True for the timeout kind, which some callers tolerate
    pub fn is_timeout(&self) -> bool {
        matches!(self, AuditError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
