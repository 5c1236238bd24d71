//! Import orchestration.

use serde_json::{Map, Number, Value};

use crate::bundle::{
    ASSOCIATES_FIELD, ExportBundle, IMPORT_ORDER, PARENT_KEY_FIELD, RECORDS_COLLECTION,
    SUB_ERRORS_COLLECTION, SUB_ERRORS_FIELD,
};
use crate::clean::clean_record;
use crate::error::{ImportError, ImportResult};
use crate::store::{DocumentPath, StoreBackend};

use super::batch::{BATCH_OPERATION_LIMIT, BatchWriter};
use super::report::ImportReport;

/// Writes an export bundle into the store in dependency order.
///
/// The backend is injected so the caller owns the client's lifetime; the
/// importer keeps no state across runs.
pub struct Importer<'a, B: StoreBackend> {
    backend: &'a B,
    batch_limit: usize,
}

impl<'a, B: StoreBackend> Importer<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self::with_batch_limit(backend, BATCH_OPERATION_LIMIT)
    }

    pub fn with_batch_limit(backend: &'a B, batch_limit: usize) -> Self {
        Self {
            backend,
            batch_limit,
        }
    }

    /// Run the full import. Collections are processed strictly in
    /// [`IMPORT_ORDER`], records in their original export order, one batch
    /// commit at a time. The first commit failure aborts the run; batches
    /// committed before it stay persisted.
    pub async fn run(&self, bundle: &ExportBundle) -> ImportResult<ImportReport> {
        let mut report = ImportReport::default();

        for &collection in IMPORT_ORDER {
            let records = match bundle.records(collection) {
                Some(records) if !records.is_empty() => records,
                _ => {
                    log::info!("collection '{collection}' empty or missing, skipping");
                    report.record_skipped(collection);
                    continue;
                }
            };

            log::info!(
                "importing {} documents into collection '{collection}'",
                records.len()
            );

            let mut writer = BatchWriter::with_limit(self.backend, self.batch_limit);
            let mut operations = 0usize;

            for (index, record) in records.iter().enumerate() {
                let mut payload = clean_record(record.clone());
                let document_id =
                    take_document_id(&mut payload).ok_or_else(|| ImportError::RecordId {
                        collection: collection.to_string(),
                        index,
                    })?;
                let path = DocumentPath::root(collection, &document_id);

                if collection == RECORDS_COLLECTION {
                    // Associated-party ids are reserved for a future
                    // relational structure and never persisted here.
                    payload.remove(ASSOCIATES_FIELD);
                    let sub_errors = take_sub_errors(&mut payload);

                    writer.stage(path.clone(), payload);
                    operations += 1;
                    writer.flush_if_full().await?;

                    for (position, item) in sub_errors.into_iter().enumerate() {
                        let Value::Object(sub_record) = item else {
                            return Err(ImportError::SubRecordShape {
                                document: path.to_string(),
                                position,
                            });
                        };

                        let sub_id = sub_record_id(&sub_record, position);
                        let mut sub_payload = sub_record;
                        sub_payload.remove("id");
                        sub_payload.remove(PARENT_KEY_FIELD);

                        writer.stage(
                            path.child(SUB_ERRORS_COLLECTION, &sub_id),
                            clean_record(sub_payload),
                        );
                        operations += 1;
                        writer.flush_if_full().await?;
                    }
                } else {
                    writer.stage(path, payload);
                    operations += 1;
                    writer.flush_if_full().await?;
                }
            }

            // Batches never span collections.
            writer.flush().await?;
            report.record(collection, operations);
            log::info!("collection '{collection}' imported, {operations} operations");
        }

        Ok(report)
    }
}

/// Pop the record's `id` field and coerce it to the document key. The key
/// becomes the storage identity and is never kept as a field value.
fn take_document_id(payload: &mut Map<String, Value>) -> Option<String> {
    match payload.remove("id")? {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Pop the nested sub-error entries; absent or malformed yields none.
fn take_sub_errors(payload: &mut Map<String, Value>) -> Vec<Value> {
    match payload.remove(SUB_ERRORS_FIELD) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Sub-record document key: its own `id` when present, else the 1-based
/// position in the list. Falsy ids (null, `0`, `""`) fall back to the
/// position too; legacy documents are keyed positionally and must keep
/// resolving to the same keys.
fn sub_record_id(sub_record: &Map<String, Value>, position: usize) -> String {
    match sub_record.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) if !is_zero(id) => id.to_string(),
        _ => (position + 1).to_string(),
    }
}

fn is_zero(number: &Number) -> bool {
    number.as_f64().is_some_and(|value| value == 0.0)
}
