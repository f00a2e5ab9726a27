// Services module for business logic
pub mod image_uploader;
pub mod metadata_scraper;
pub mod project_index_service;
pub mod project_store;
