//! Per-collection import reporting.

/// Outcome of one collection in the import order.
#[derive(Debug, Clone)]
pub struct CollectionReport {
    pub name: String,
    /// Staged write operations: parent documents and sub-records combined.
    pub operations: usize,
    /// True when the collection was absent from the bundle or empty.
    pub skipped: bool,
}

/// Outcome of a full import run, in collection import order.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub collections: Vec<CollectionReport>,
}

impl ImportReport {
    pub fn record(&mut self, name: &str, operations: usize) {
        self.collections.push(CollectionReport {
            name: name.to_string(),
            operations,
            skipped: false,
        });
    }

    pub fn record_skipped(&mut self, name: &str) {
        self.collections.push(CollectionReport {
            name: name.to_string(),
            operations: 0,
            skipped: true,
        });
    }

    pub fn collection(&self, name: &str) -> Option<&CollectionReport> {
        self.collections
            .iter()
            .find(|collection| collection.name == name)
    }

    /// Total staged write operations across all collections.
    pub fn total_operations(&self) -> usize {
        self.collections
            .iter()
            .map(|collection| collection.operations)
            .sum()
    }
}
