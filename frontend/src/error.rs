use thiserror::Error;

/// Failures the page can run into. None of them are fatal: callers log and
/// fall back to showing no feedback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UiError {
    #[error("clipboard write rejected: {0}")]
    ClipboardUnavailable(String),
    #[error("section `{0}` has no layout yet")]
    GeometryUnavailable(String),
    #[error("invalid scramble settings: {0}")]
    InvalidScramble(&'static str),
    #[error("content catalog is malformed: {0}")]
    Catalog(String),
    #[error("{0} is not available in this host")]
    HostUnavailable(&'static str),
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Catalog(err.to_string())
    }
}
