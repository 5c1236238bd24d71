use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that abort an import run.
///
/// There is no partial-failure handling below this level: every variant
/// surfaces to the console and terminates the process with a non-zero exit
/// status. Empty or absent collections are not errors and are reported
/// through the import report instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read export file {path:?}: {source}")]
    BundleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse export file {path:?}: {source}")]
    BundleParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("export bundle root is not a JSON object of collections")]
    BundleRoot,
    #[error("collection '{collection}' is not an array of record objects")]
    BundleShape { collection: String },
    #[error("record {index} in collection '{collection}' has no usable id")]
    RecordId { collection: String, index: usize },
    #[error("sub-error {position} of document '{document}' is not an object")]
    SubRecordShape { document: String, position: usize },
    #[error("no target project id: pass --project or use a key file that carries project_id")]
    ProjectId,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
