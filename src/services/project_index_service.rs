use std::collections::HashSet;
use std::sync::Arc;

use crate::models::project_index::{ProjectIndex, UpsertOutcome};
use crate::models::project_record::{ProjectMeta, ProjectRecord};
use crate::models::sync_report::SyncReport;
use crate::services::metadata_scraper::MetadataScraper;
use crate::services::project_store::ProjectStore;
use crate::utils::config::ProjectPaths;
use crate::utils::error::Result;
use crate::utils::validation::require_slug;

const PAGE_EXTENSION: &str = ".html";

/// Keeps `projects.json` and the `projects/` pages in agreement.
///
/// Every operation is a whole-document read-modify-write of the index with no
/// locking: concurrent callers can lose each other's updates (last write wins).
#[derive(Clone)]
pub struct ProjectIndexService {
    store: Arc<dyn ProjectStore>,
    scraper: MetadataScraper,
    page_path_prefix: String,
}

impl ProjectIndexService {
    /// `page_path_prefix` is prepended to `projects/<slug>.html` in returned paths
    pub fn new(store: Arc<dyn ProjectStore>, scraper: MetadataScraper, page_path_prefix: impl Into<String>) -> Self {
        Self {
            store,
            scraper,
            page_path_prefix: page_path_prefix.into(),
        }
    }

    /// Service for a configured layout
    pub fn for_paths(store: Arc<dyn ProjectStore>, paths: &ProjectPaths, owner_name: Option<&str>) -> Result<Self> {
        let scraper = MetadataScraper::new(owner_name)?;
        Ok(Self::new(store, scraper, paths.page_path_prefix.clone()))
    }

    /// Write the page for `slug_raw` and insert or replace its index record.
    /// Returns the stored page path.
    pub async fn upsert_project(&self, slug_raw: &str, html: Option<&str>, meta: &ProjectMeta) -> Result<String> {
        let slug = require_slug(slug_raw)?;

        self.store
            .write_page(&format!("{}{}", slug, PAGE_EXTENSION), html.unwrap_or_default())
            .await?;

        let mut index = self.load_index().await?;
        let outcome = index.upsert(ProjectRecord::from_meta(&slug, meta));
        self.save_index(&index).await?;

        match outcome {
            UpsertOutcome::Inserted => tracing::info!(%slug, "Added project to index"),
            UpsertOutcome::Replaced(position) => tracing::info!(%slug, position, "Updated project in index"),
        }

        Ok(format!("{}projects/{}{}", self.page_path_prefix, slug, PAGE_EXTENSION))
    }

    /// Add records for unindexed pages and drop records whose page is gone
    pub async fn reconcile_index(&self) -> Result<SyncReport> {
        let mut index = self.load_index().await?;
        let pages = self.store.list_pages().await?;

        let mut known = index.slug_keys();
        let mut on_disk = HashSet::new();
        let mut added = Vec::new();

        for file_name in &pages {
            let slug = file_name.strip_suffix(PAGE_EXTENSION).unwrap_or(file_name);
            let key = slug.to_lowercase();
            on_disk.insert(key.clone());

            if known.contains(&key) {
                continue;
            }

            let html = match self.store.read_page(file_name).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(file = %file_name, error = %e, "Could not read page, indexing without metadata");
                    String::new()
                }
            };

            let scraped = self.scraper.scrape(slug, &html);
            let mut record = ProjectRecord::new(slug, scraped.title);
            record.image = scraped.image;
            index.upsert(record);

            known.insert(key);
            added.push(slug.to_string());
        }

        let removed_count = index.retain_slugs(&on_disk);
        self.save_index(&index).await?;

        let report = SyncReport {
            records: index.into_records(),
            added,
            removed_count,
        };
        tracing::info!(
            total = report.records.len(),
            added = report.added.len(),
            removed = report.removed_count,
            "Reconciled project index"
        );

        Ok(report)
    }

    /// Current index contents
    pub async fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        Ok(self.load_index().await?.into_records())
    }

    /// Missing and unparseable indexes both load as empty
    async fn load_index(&self) -> Result<ProjectIndex> {
        let Some(contents) = self.store.read_index().await? else {
            return Ok(ProjectIndex::new());
        };

        match ProjectIndex::parse(&contents) {
            Ok(index) => Ok(index),
            Err(e) => {
                tracing::warn!(error = %e, "Project index is not valid JSON, starting from an empty index");
                Ok(ProjectIndex::new())
            }
        }
    }

    async fn save_index(&self, index: &ProjectIndex) -> Result<()> {
        let contents = index.to_pretty_json()?;
        self.store.write_index(&contents).await
    }
}
