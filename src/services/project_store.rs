use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::fs as async_fs;

use crate::utils::config::ProjectPaths;
use crate::utils::error::Result;

/// Storage behind the project index: the index document, the project pages
/// and uploaded images.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Raw index bytes, `None` when no index exists yet
    async fn read_index(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the whole index document
    async fn write_index(&self, contents: &str) -> Result<()>;

    async fn write_page(&self, file_name: &str, html: &str) -> Result<()>;

    async fn read_page(&self, file_name: &str) -> Result<String>;

    /// File names of all `*.html` pages, in listing order
    async fn list_pages(&self) -> Result<Vec<String>>;

    async fn write_image(&self, file_name: &str, bytes: &[u8]) -> Result<()>;
}

/// Filesystem-backed store rooted at the configured directories
#[derive(Debug, Clone)]
pub struct FsProjectStore {
    paths: ProjectPaths,
}

impl FsProjectStore {
    pub fn new(paths: ProjectPaths) -> Self {
        Self { paths }
    }

    fn page_path(&self, file_name: &str) -> PathBuf {
        self.paths.projects_dir.join(file_name)
    }
}

#[async_trait]
impl ProjectStore for FsProjectStore {
    async fn read_index(&self) -> Result<Option<Vec<u8>>> {
        match async_fs::read(&self.paths.index_file).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_index(&self, contents: &str) -> Result<()> {
        let path = self.paths.index_file.clone();
        let contents = contents.to_owned();

        tokio::task::spawn_blocking(move || write_atomically(&path, contents.as_bytes()))
            .await
            .map_err(io::Error::other)??;

        Ok(())
    }

    async fn write_page(&self, file_name: &str, html: &str) -> Result<()> {
        async_fs::create_dir_all(&self.paths.projects_dir).await?;
        async_fs::write(self.page_path(file_name), html).await?;
        Ok(())
    }

    async fn read_page(&self, file_name: &str) -> Result<String> {
        Ok(async_fs::read_to_string(self.page_path(file_name)).await?)
    }

    async fn list_pages(&self) -> Result<Vec<String>> {
        let mut entries = match async_fs::read_dir(&self.paths.projects_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut pages = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".html") {
                    pages.push(name.to_string());
                }
            }
        }

        Ok(pages)
    }

    async fn write_image(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        async_fs::create_dir_all(&self.paths.images_dir).await?;
        async_fs::write(self.paths.images_dir.join(file_name), bytes).await?;
        Ok(())
    }
}

/// Write through a temporary file in the target directory, then rename over
/// the destination so readers never observe a partial document.
fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[derive(Debug, Default)]
struct MemoryState {
    index: Option<String>,
    pages: Vec<(String, String)>,
    images: HashMap<String, Vec<u8>>,
}

/// In-memory store for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    state: Mutex<MemoryState>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing index document
    pub fn with_index(contents: impl Into<String>) -> Self {
        let store = Self::default();
        store.lock().index = Some(contents.into());
        store
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn index_contents(&self) -> Option<String> {
        self.lock().index.clone()
    }

    pub fn page(&self, file_name: &str) -> Option<String> {
        self.lock()
            .pages
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, html)| html.clone())
    }

    /// Add or overwrite a page outside the service, like an editor on disk would
    pub fn insert_page(&self, file_name: &str, html: &str) {
        let mut state = self.lock();
        match state.pages.iter_mut().find(|(name, _)| name == file_name) {
            Some(entry) => entry.1 = html.to_string(),
            None => state.pages.push((file_name.to_string(), html.to_string())),
        }
    }

    pub fn image(&self, file_name: &str) -> Option<Vec<u8>> {
        self.lock().images.get(file_name).cloned()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn read_index(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.index_contents().map(String::into_bytes))
    }

    async fn write_index(&self, contents: &str) -> Result<()> {
        self.lock().index = Some(contents.to_string());
        Ok(())
    }

    async fn write_page(&self, file_name: &str, html: &str) -> Result<()> {
        self.insert_page(file_name, html);
        Ok(())
    }

    async fn read_page(&self, file_name: &str) -> Result<String> {
        self.page(file_name).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("page not found: {}", file_name)).into()
        })
    }

    async fn list_pages(&self) -> Result<Vec<String>> {
        Ok(self
            .lock()
            .pages
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| name.ends_with(".html"))
            .collect())
    }

    async fn write_image(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        self.lock().images.insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }
}
