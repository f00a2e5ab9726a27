use serde::{Deserialize, Serialize};

use crate::models::project_record::ProjectRecord;

/// Outcome of reconciling the index with the projects directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Index after reconciliation
    pub records: Vec<ProjectRecord>,
    /// Slugs appended for pages that had no record, in file casing
    pub added: Vec<String>,
    /// Records dropped because their page is gone
    pub removed_count: usize,
}

impl SyncReport {
    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "Synced {} project(s): {} added, {} removed",
            self.records.len(),
            self.added.len(),
            self.removed_count
        )
    }
}
