use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::project_record::ProjectRecord;

/// Ordered list of project records persisted as `projects.json`.
///
/// Slugs are unique under case-insensitive comparison; every mutation below
/// keeps it that way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectIndex {
    records: Vec<ProjectRecord>,
}

/// What an upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    /// Replaced the record at this position
    Replaced(usize),
}

impl ProjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ProjectRecord>) -> Self {
        Self { records }
    }

    /// Parse the persisted JSON array; bytes that are not UTF-8 are a parse error
    pub fn parse(contents: impl AsRef<[u8]>) -> serde_json::Result<Self> {
        serde_json::from_slice(contents.as_ref())
    }

    /// Pretty-printed JSON array, as written to disk
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProjectRecord> {
        self.records
    }

    /// Position of the record with this slug, ignoring case
    pub fn position(&self, slug: &str) -> Option<usize> {
        self.records.iter().position(|record| record.has_slug(slug))
    }

    pub fn get(&self, slug: &str) -> Option<&ProjectRecord> {
        self.position(slug).map(|index| &self.records[index])
    }

    /// Lowercased slugs of every record
    pub fn slug_keys(&self) -> HashSet<String> {
        self.records.iter().map(|record| record.slug.to_lowercase()).collect()
    }

    /// Replace the record sharing the slug in place, or append
    pub fn upsert(&mut self, record: ProjectRecord) -> UpsertOutcome {
        match self.position(&record.slug) {
            Some(index) => {
                self.records[index] = record;
                UpsertOutcome::Replaced(index)
            }
            None => {
                self.records.push(record);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Drop every record whose lowercased slug is not in `keep`.
    /// Survivors keep their relative order. Returns the number removed.
    pub fn retain_slugs(&mut self, keep: &HashSet<String>) -> usize {
        let before = self.records.len();
        self.records.retain(|record| keep.contains(&record.slug.to_lowercase()));
        before - self.records.len()
    }
}
