//! Hierarchical batched import pipeline.
//!
//! Writes an export bundle into the store in three layers:
//!
//! 1. **Batching** (`batch`) - bounded write batches with a single staged
//!    operation counter and explicit remainder flushing
//! 2. **Orchestration** (`importer`) - fixed-order collection iteration,
//!    record cleaning, and the parent/sub-collection special case
//! 3. **Reporting** (`report`) - per-collection operation counts
//!
//! The run is strictly sequential: one collection, one record, and one batch
//! commit at a time, each commit awaited before staging continues.

pub mod batch;
pub mod importer;
pub mod report;

pub use batch::{BATCH_OPERATION_LIMIT, BatchWriter};
pub use importer::Importer;
pub use report::{CollectionReport, ImportReport};
