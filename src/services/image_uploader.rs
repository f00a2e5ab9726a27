use std::sync::Arc;

use crate::services::project_store::ProjectStore;
use crate::utils::error::Result;
use crate::utils::validation::require_file_name;

/// URL prefix of uploaded images, relative to the editor root
pub const IMAGES_URL_PREFIX: &str = "public/images";

/// Stores editor image uploads under the public images directory
#[derive(Clone)]
pub struct ImageUploader {
    store: Arc<dyn ProjectStore>,
}

impl ImageUploader {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// Save `bytes` under the sanitized client file name and return its
    /// public URL. An existing image with the same name is overwritten.
    pub async fn store_image(&self, client_name: &str, bytes: &[u8]) -> Result<String> {
        let file_name = require_file_name(client_name)?;
        self.store.write_image(&file_name, bytes).await?;

        tracing::info!(file = %file_name, size = bytes.len(), "Stored uploaded image");
        Ok(format!("{}/{}", IMAGES_URL_PREFIX, file_name))
    }
}
