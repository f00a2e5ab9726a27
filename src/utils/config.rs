// Server configuration: defaults, optional TOML/JSON file, CLI/env overrides

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::utils::error::{EditorError, Result};

/// Where `projects/` and `projects.json` live relative to the site root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Next to the editor directory, directly under the site root
    #[default]
    Sibling,
    /// Inside the editor directory
    Nested,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Project index server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP bind address
    pub bind: SocketAddr,
    /// Directory holding the editor directory and, in the sibling layout, the project content
    pub site_root: PathBuf,
    /// Name of the editor directory under the site root
    pub editor_dir: String,
    /// Placement of the projects directory and index file
    pub layout: Layout,
    /// Page `/` redirects to
    pub editor_page: String,
    /// Site owner stripped from scraped titles ("Page | Owner")
    pub owner_name: Option<String>,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            site_root: PathBuf::from("."),
            editor_dir: "template-editor".to_string(),
            layout: Layout::Sibling,
            editor_page: "index.html".to_string(),
            owner_name: None,
            max_upload_bytes: 25 * 1024 * 1024, // 25 MiB
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Resolved on-disk locations for one configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Static assets served by the editor
    pub editor_root: PathBuf,
    /// One `<slug>.html` per project
    pub projects_dir: PathBuf,
    /// `projects.json`
    pub index_file: PathBuf,
    /// Upload destination
    pub images_dir: PathBuf,
    /// Prefix of returned page paths, relative to the site root
    pub page_path_prefix: String,
}

/// Configuration options shared by every subcommand
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Configuration file (TOML or JSON)
    #[arg(short, long, global = true, env = "PROJECT_INDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Site root directory
    #[arg(long, global = true, env = "PROJECT_INDEX_SITE_ROOT")]
    pub site_root: Option<PathBuf>,

    /// Editor directory name under the site root
    #[arg(long, global = true, env = "PROJECT_INDEX_EDITOR_DIR")]
    pub editor_dir: Option<String>,

    /// Placement of projects/ and projects.json
    #[arg(long, global = true, value_enum, env = "PROJECT_INDEX_LAYOUT")]
    pub layout: Option<Layout>,

    /// HTTP bind address
    #[arg(long, global = true, env = "PROJECT_INDEX_BIND")]
    pub bind: Option<SocketAddr>,

    /// Site owner stripped from scraped page titles
    #[arg(long, global = true, env = "PROJECT_INDEX_OWNER_NAME")]
    pub owner_name: Option<String>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, env = "PROJECT_INDEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, env = "PROJECT_INDEX_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Build the configuration from an optional file plus CLI/env overrides
    pub fn load(args: &ConfigArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(site_root) = &args.site_root {
            config.site_root = site_root.clone();
        }
        if let Some(editor_dir) = &args.editor_dir {
            config.editor_dir = editor_dir.clone();
        }
        if let Some(layout) = args.layout {
            config.layout = layout;
        }
        if let Some(bind) = args.bind {
            config.bind = bind;
        }
        if let Some(owner_name) = &args.owner_name {
            config.owner_name = Some(owner_name.clone());
        }
        if let Some(log_level) = &args.log_level {
            config.log_level = log_level.clone();
        }
        if let Some(log_format) = args.log_format {
            config.log_format = log_format;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, JSON when the extension says so, TOML otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| EditorError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&content)
                .map_err(|e| EditorError::Config(format!("Invalid JSON in {}: {}", path.display(), e)))
        } else {
            toml::from_str(&content)
                .map_err(|e| EditorError::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_upload_bytes == 0 {
            return Err(EditorError::Config("max_upload_bytes must be greater than 0".to_string()));
        }

        if self.editor_dir.trim().is_empty() {
            return Err(EditorError::Config("editor_dir cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Resolve directories and the returned path prefix for the configured layout
    pub fn paths(&self) -> ProjectPaths {
        let editor_root = self.site_root.join(&self.editor_dir);
        let (content_root, page_path_prefix) = match self.layout {
            Layout::Sibling => (self.site_root.clone(), String::new()),
            Layout::Nested => (editor_root.clone(), format!("{}/", self.editor_dir)),
        };

        ProjectPaths {
            images_dir: editor_root.join("public").join("images"),
            editor_root,
            projects_dir: content_root.join("projects"),
            index_file: content_root.join("projects.json"),
            page_path_prefix,
        }
    }
}
