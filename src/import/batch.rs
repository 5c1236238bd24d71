//! Bounded write batching.

use serde_json::{Map, Value};

use crate::store::{DocumentPath, DocumentWrite, StoreBackend, StoreError};

/// Staged operations per batch; headroom under the store's hard limit of
/// 500 operations per atomic commit.
pub const BATCH_OPERATION_LIMIT: usize = 400;

/// Accumulates upsert writes and commits them in bounded batches.
///
/// The writer owns the single staged-operation counter: within a collection,
/// parent documents and their sub-records are staged through the same writer
/// and share this one scope, so a batch can never exceed the limit no matter
/// where a record's sub-records fall. Writers are per-collection; batches
/// never span collection boundaries.
pub struct BatchWriter<'a, B: StoreBackend> {
    backend: &'a B,
    writes: Vec<DocumentWrite>,
    limit: usize,
    committed_batches: usize,
}

impl<'a, B: StoreBackend> BatchWriter<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self::with_limit(backend, BATCH_OPERATION_LIMIT)
    }

    pub fn with_limit(backend: &'a B, limit: usize) -> Self {
        Self {
            backend,
            writes: Vec::new(),
            limit: limit.max(1),
            committed_batches: 0,
        }
    }

    /// Stage one upsert-by-id write into the current batch.
    pub fn stage(&mut self, path: DocumentPath, fields: Map<String, Value>) {
        self.writes.push(DocumentWrite { path, fields });
    }

    /// Staged operations in the current batch.
    pub fn staged(&self) -> usize {
        self.writes.len()
    }

    /// Commit and reset the batch once it has reached the operation limit.
    ///
    /// Checked after every staged operation, not just at record boundaries:
    /// sub-record writes can cross the limit mid-record.
    pub async fn flush_if_full(&mut self) -> Result<(), StoreError> {
        if self.writes.len() >= self.limit {
            self.commit_staged().await?;
        }
        Ok(())
    }

    /// Commit whatever is staged. A no-op when the batch is empty, so an
    /// exactly-full batch yields exactly one commit.
    pub async fn flush(&mut self) -> Result<(), StoreError> {
        if !self.writes.is_empty() {
            self.commit_staged().await?;
        }
        Ok(())
    }

    async fn commit_staged(&mut self) -> Result<(), StoreError> {
        let writes = std::mem::take(&mut self.writes);
        self.backend.commit(&writes).await?;
        self.committed_batches += 1;
        log::debug!(
            "committed batch {} ({} operations)",
            self.committed_batches,
            writes.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingBackend {
        batch_sizes: Mutex<Vec<usize>>,
    }

    impl StoreBackend for CountingBackend {
        async fn commit(&self, writes: &[DocumentWrite]) -> Result<(), StoreError> {
            self.batch_sizes.lock().unwrap().push(writes.len());
            Ok(())
        }
    }

    fn stage_one(writer: &mut BatchWriter<'_, CountingBackend>, id: usize) {
        writer.stage(
            DocumentPath::root("setores", &id.to_string()),
            Map::new(),
        );
    }

    #[tokio::test]
    async fn commits_only_when_full() {
        let backend = CountingBackend::default();
        let mut writer = BatchWriter::with_limit(&backend, 3);

        for id in 0..2 {
            stage_one(&mut writer, id);
            writer.flush_if_full().await.unwrap();
        }
        assert!(backend.batch_sizes.lock().unwrap().is_empty());
        assert_eq!(writer.staged(), 2);

        stage_one(&mut writer, 2);
        writer.flush_if_full().await.unwrap();
        assert_eq!(*backend.batch_sizes.lock().unwrap(), vec![3]);
        assert_eq!(writer.staged(), 0);
    }

    #[tokio::test]
    async fn flush_commits_remainder_and_skips_empty() {
        let backend = CountingBackend::default();
        let mut writer = BatchWriter::with_limit(&backend, 3);

        stage_one(&mut writer, 0);
        writer.flush().await.unwrap();
        // Empty flush after the remainder commit issues nothing.
        writer.flush().await.unwrap();

        assert_eq!(*backend.batch_sizes.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn exactly_full_batch_yields_one_commit() {
        let backend = CountingBackend::default();
        let mut writer = BatchWriter::with_limit(&backend, 3);

        for id in 0..3 {
            stage_one(&mut writer, id);
            writer.flush_if_full().await.unwrap();
        }
        writer.flush().await.unwrap();

        assert_eq!(*backend.batch_sizes.lock().unwrap(), vec![3]);
    }
}
