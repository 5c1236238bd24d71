use std::env;
use std::time::Duration;

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_duration_millis(key: &str, default_millis: u64) -> Duration {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or_else(|| Duration::from_millis(default_millis))
}

/// Configuration for the Firestore REST client.
///
/// The base URL is overridable so the client can be pointed at the local
/// emulator; everything else defaults to the production endpoints.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database_id: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database_id: env_string("FIRESTORE_DATABASE_ID", "(default)"),
            base_url: env_string("FIRESTORE_BASE_URL", "https://firestore.googleapis.com"),
            request_timeout: env_duration_millis("FIRESTORE_TIMEOUT_MS", 30_000),
        }
    }

    /// Root of the documents tree:
    /// `projects/{project}/databases/{database}/documents`.
    pub fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database_id
        )
    }

    /// Endpoint that commits a write batch atomically.
    pub fn commit_url(&self) -> String {
        format!(
            "{}/v1/{}:commit",
            self.base_url.trim_end_matches('/'),
            self.documents_root()
        )
    }
}
