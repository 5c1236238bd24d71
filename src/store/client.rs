use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use super::config::FirestoreConfig;
use super::credentials::{ServiceAccountKey, TokenProvider};
use super::encode::encode_fields;
use super::error::StoreError;
use super::{DocumentWrite, StoreBackend};

/// Write-side Firestore REST client.
///
/// Issues only batched upsert-by-id commits against the `documents:commit`
/// endpoint; it never reads from the store. Each commit is atomic at the
/// store level.
pub struct FirestoreClient {
    http: reqwest::Client,
    config: FirestoreConfig,
    tokens: TokenProvider,
}

impl FirestoreClient {
    pub fn new(config: FirestoreConfig, key: ServiceAccountKey) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent("auditoria-importer/0.1")
            .build()?;

        let tokens = TokenProvider::new(http.clone(), key)?;

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }
}

#[derive(Debug, Serialize)]
struct CommitRequest {
    writes: Vec<WritePayload>,
}

#[derive(Debug, Serialize)]
struct WritePayload {
    update: DocumentPayload,
}

#[derive(Debug, Serialize)]
struct DocumentPayload {
    name: String,
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorEnvelope {
    error: RpcErrorBody,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: String,
}

impl StoreBackend for FirestoreClient {
    async fn commit(&self, writes: &[DocumentWrite]) -> Result<(), StoreError> {
        let token = self.tokens.access_token().await?;
        let documents_root = self.config.documents_root();

        let payload = CommitRequest {
            writes: writes
                .iter()
                .map(|write| WritePayload {
                    update: DocumentPayload {
                        name: write.path.resource_name(&documents_root),
                        fields: encode_fields(&write.fields),
                    },
                })
                .collect(),
        };

        let response = self
            .http
            .post(self.config.commit_url())
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<RpcErrorEnvelope>(&body) {
            Ok(envelope) => (envelope.error.status, envelope.error.message),
            Err(_) => (None, body),
        };

        Err(StoreError::Commit {
            status,
            code,
            message,
        })
    }
}
