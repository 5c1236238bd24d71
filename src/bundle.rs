//! Export bundle loading.
//!
//! The bundle is the JSON file produced by the relational exporter: a single
//! top-level object mapping collection names to arrays of record objects.
//! It is read once per run and treated as immutable afterwards.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ImportError, ImportResult};

/// Collections in import order: master collections first, then the
/// dependent `prontuarios` collection, which references the masters by id.
/// The target store enforces no foreign keys, so this ordering is the only
/// thing keeping references resolvable and must not be derived at runtime.
pub const IMPORT_ORDER: &[&str] = &[
    "convenios",
    "setores",
    "tipos_erro",
    "categorias_erro",
    "responsaveis",
    "prontuarios",
];

/// The one collection whose records own a nested list of error entries.
pub const RECORDS_COLLECTION: &str = "prontuarios";

/// Field on a prontuário record holding its nested error entries.
pub const SUB_ERRORS_FIELD: &str = "erros";

/// Sub-collection the nested error entries are written into.
pub const SUB_ERRORS_COLLECTION: &str = "erros";

/// Foreign key back to the parent record, redundant inside a sub-collection.
pub const PARENT_KEY_FIELD: &str = "prontuario_id";

/// Associated-party ids on a prontuário record. Reserved for a future
/// relational structure and not persisted by this pipeline.
pub const ASSOCIATES_FIELD: &str = "responsaveis";

/// In-memory form of the export file.
#[derive(Debug)]
pub struct ExportBundle {
    collections: HashMap<String, Vec<Map<String, Value>>>,
}

impl ExportBundle {
    /// Read and validate the export file. A missing or unparsable file and
    /// any top-level value that is not an array of objects are fatal.
    pub fn load(path: &Path) -> ImportResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ImportError::BundleRead {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value =
            serde_json::from_str(&raw).map_err(|source| ImportError::BundleParse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_value(value)
    }

    /// Build a bundle from an already-parsed JSON value.
    pub fn from_value(value: Value) -> ImportResult<Self> {
        let Value::Object(top) = value else {
            return Err(ImportError::BundleRoot);
        };

        let mut collections = HashMap::with_capacity(top.len());
        for (name, value) in top {
            let Value::Array(items) = value else {
                return Err(ImportError::BundleShape { collection: name });
            };

            let mut records = Vec::with_capacity(items.len());
            for item in items {
                let Value::Object(record) = item else {
                    return Err(ImportError::BundleShape { collection: name });
                };
                records.push(record);
            }
            collections.insert(name, records);
        }

        Ok(Self { collections })
    }

    /// Records of one collection in their original export order, or `None`
    /// when the collection is absent from the bundle.
    pub fn records(&self, collection: &str) -> Option<&[Map<String, Value>]> {
        self.collections.get(collection).map(Vec::as_slice)
    }

    /// Number of collections present in the bundle.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
