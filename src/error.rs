use crate::gmail_api::AuthError;
use crate::permissions::PermissionError;
use crate::platform::SourceKind;
use crate::state::Alert;

/// Everything that can end a retrieval flow. Each variant maps to exactly one
/// user-facing alert.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0} retrieval is not supported on this platform")]
    PlatformUnsupported(SourceKind),

    #[error("permission denied")]
    PermissionDenied,

    #[error("permission request failed: {0}")]
    Permission(#[from] PermissionError),

    #[error("native listing failed: {0}")]
    NativeCall(String),

    #[error("malformed listing payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("sign-in failed: {0}")]
    Auth(#[from] AuthError),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("fetch task ended abnormally: {0}")]
    Interrupted(String),
}

impl FetchError {
    pub fn alert(&self) -> Alert {
        match self {
            FetchError::PlatformUnsupported(kind) => Alert::unsupported(*kind),
            FetchError::PermissionDenied => Alert::new(
                "Permission Denied",
                "SMS permission is required to read messages",
            ),
            FetchError::Permission(_) => Alert::new("Error", "Failed to request SMS permission"),
            FetchError::NativeCall(_) => Alert::new("Error", "Failed to fetch SMS messages"),
            FetchError::Parse(_) => Alert::new("Error", "Failed to parse SMS messages"),
            FetchError::Auth(_) | FetchError::Network(_) | FetchError::Interrupted(_) => {
                Alert::new("Error", "Failed to fetch emails")
            }
        }
    }
}
