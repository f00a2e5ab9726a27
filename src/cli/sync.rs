use std::sync::Arc;

use anyhow::{Context, Result};

use crate::services::project_index_service::ProjectIndexService;
use crate::services::project_store::FsProjectStore;
use crate::utils::config::Config;

/// One-shot reconciliation of `projects.json` with the projects directory
#[derive(Debug, Default)]
pub struct SyncCommand {
    /// Output the full report as JSON instead of the summary line
    pub json: bool,
}

impl SyncCommand {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let paths = config.paths();
        let store = Arc::new(FsProjectStore::new(paths.clone()));
        let service = ProjectIndexService::for_paths(store, &paths, config.owner_name.as_deref())?;

        let report = service
            .reconcile_index()
            .await
            .with_context(|| format!("Failed to reconcile {}", paths.index_file.display()))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", report.summary());
            for slug in &report.added {
                println!("  + {}", slug);
            }
        }

        Ok(())
    }
}
