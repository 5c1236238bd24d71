//! Write-side Firestore integration: document addressing, typed-value
//! encoding, service-account authentication, and the batched commit client.
//!
//! The importer never talks to the store directly; it goes through the
//! [`StoreBackend`] trait so the client is injected at the entry point and
//! tests can substitute an in-memory backend.

pub mod client;
pub mod config;
pub mod credentials;
pub mod encode;
pub mod error;

pub use client::FirestoreClient;
pub use config::FirestoreConfig;
pub use credentials::ServiceAccountKey;
pub use error::StoreError;

use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;

/// Address of a single document: ordered collection/document segment pairs.
///
/// A root path has one segment (`setores/1`); a sub-collection path has two
/// (`prontuarios/10/erros/3`). One nesting level is all this pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPath {
    segments: Vec<(String, String)>,
}

impl DocumentPath {
    /// Path of a document directly under a top-level collection.
    pub fn root(collection: &str, document_id: &str) -> Self {
        Self {
            segments: vec![(collection.to_string(), document_id.to_string())],
        }
    }

    /// Path of a document in a sub-collection under this document.
    pub fn child(&self, collection: &str, document_id: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push((collection.to_string(), document_id.to_string()));
        Self { segments }
    }

    pub fn segments(&self) -> &[(String, String)] {
        &self.segments
    }

    /// Full resource name under a documents root, e.g.
    /// `projects/p/databases/(default)/documents/setores/1`.
    pub fn resource_name(&self, documents_root: &str) -> String {
        format!("{documents_root}/{self}")
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (collection, document_id)) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{collection}/{document_id}")?;
        }
        Ok(())
    }
}

/// One staged upsert-by-id write: creates the target document or fully
/// replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWrite {
    pub path: DocumentPath,
    pub fields: Map<String, Value>,
}

/// Write-side handle to the target store.
///
/// One `commit` call persists the given writes as a single atomic batch:
/// either every write in the batch lands or none do. Callers await each
/// commit before staging further operations.
pub trait StoreBackend {
    fn commit(
        &self,
        writes: &[DocumentWrite],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
