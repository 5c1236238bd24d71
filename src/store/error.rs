use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while authenticating against or writing to the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read service account key {path:?}: {source}")]
    Credentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse service account key {path:?}: {source}")]
    CredentialsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("service account signing error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("store HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token endpoint returned status {status}: {body}")]
    Token { status: StatusCode, body: String },
    #[error("batch commit rejected ({status}): {message}")]
    Commit {
        status: StatusCode,
        /// Store-specific error code, e.g. `PERMISSION_DENIED`.
        code: Option<String>,
        message: String,
    },
}

impl StoreError {
    /// Store-specific error code for console reporting, when the store
    /// provided one.
    pub fn store_code(&self) -> Option<&str> {
        match self {
            StoreError::Commit { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
