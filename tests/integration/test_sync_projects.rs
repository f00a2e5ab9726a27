use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use project_index_server::utils::config::Config;
use project_index_server::{FsProjectStore, ProjectIndexService, ProjectMeta};

fn create_service(site_root: &Path) -> ProjectIndexService {
    let config = Config {
        site_root: site_root.to_path_buf(),
        owner_name: Some("Site Owner".to_string()),
        ..Default::default()
    };
    let paths = config.paths();
    let store = Arc::new(FsProjectStore::new(paths.clone()));
    ProjectIndexService::for_paths(store, &paths, config.owner_name.as_deref()).unwrap()
}

fn write_page(site_root: &Path, file_name: &str, html: &str) {
    let projects_dir = site_root.join("projects");
    fs::create_dir_all(&projects_dir).unwrap();
    fs::write(projects_dir.join(file_name), html).unwrap();
}

#[tokio::test]
async fn test_sync_adds_orphan_and_removes_stale_record() {
    let temp_dir = TempDir::new().unwrap();
    let site_root = temp_dir.path();
    fs::write(
        site_root.join("projects.json"),
        json!([{"slug": "unrelated", "title": "Unrelated"}]).to_string(),
    )
    .unwrap();
    write_page(site_root, "orphan.html", "<html><head><title>Orphan Page | Site Owner</title></head></html>");

    let report = create_service(site_root).reconcile_index().await.unwrap();

    assert_eq!(report.added, vec!["orphan"]);
    assert_eq!(report.removed_count, 1);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].slug, "orphan");
    assert_eq!(report.records[0].title, "Orphan Page");
    assert_eq!(report.records[0].image, "");

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(site_root.join("projects.json")).unwrap()).unwrap();
    assert_eq!(stored[0]["slug"], "orphan");
    assert_eq!(stored.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sync_twice_reports_no_changes() {
    let temp_dir = TempDir::new().unwrap();
    let site_root = temp_dir.path();
    write_page(site_root, "alpha.html", "<h1>Alpha</h1><img src=\"public/images/alpha.jpg\">");
    write_page(site_root, "beta-launch.html", "<p>plain</p>");
    let service = create_service(site_root);

    let first = service.reconcile_index().await.unwrap();
    assert_eq!(first.added.len(), 2);
    assert_eq!(first.removed_count, 0);

    let alpha = first.records.iter().find(|r| r.slug == "alpha").unwrap();
    assert_eq!(alpha.title, "Alpha");
    assert_eq!(alpha.image, "public/images/alpha.jpg");
    let beta = first.records.iter().find(|r| r.slug == "beta-launch").unwrap();
    assert_eq!(beta.title, "Beta Launch");

    let second = service.reconcile_index().await.unwrap();
    assert!(second.added.is_empty());
    assert_eq!(second.removed_count, 0);
    assert_eq!(second.records, first.records);
}

#[tokio::test]
async fn test_sync_keeps_saved_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let site_root = temp_dir.path();
    let service = create_service(site_root);

    let meta: ProjectMeta = serde_json::from_value(json!({
        "title": "Portfolio",
        "description": "Saved from the editor",
        "tags": "featured"
    }))
    .unwrap();
    service
        .upsert_project("portfolio", Some("<title>Scraped | Site Owner</title>"), &meta)
        .await
        .unwrap();

    let report = service.reconcile_index().await.unwrap();

    assert!(report.added.is_empty());
    assert_eq!(report.records[0].title, "Portfolio");
    assert_eq!(report.records[0].description, "Saved from the editor");
    assert_eq!(report.records[0].tags, vec!["featured"]);
}

#[tokio::test]
async fn test_sync_without_projects_dir_clears_index() {
    let temp_dir = TempDir::new().unwrap();
    let site_root = temp_dir.path();
    fs::write(
        site_root.join("projects.json"),
        json!([{"slug": "a"}, {"slug": "b"}]).to_string(),
    )
    .unwrap();

    let report = create_service(site_root).reconcile_index().await.unwrap();

    assert!(report.records.is_empty());
    assert_eq!(report.removed_count, 2);
    assert_eq!(fs::read_to_string(site_root.join("projects.json")).unwrap(), "[]");
}

#[tokio::test]
async fn test_sync_ignores_non_html_files() {
    let temp_dir = TempDir::new().unwrap();
    let site_root = temp_dir.path();
    write_page(site_root, "page.html", "");
    write_page(site_root, "draft.htm", "");
    write_page(site_root, "notes.txt", "");

    let report = create_service(site_root).reconcile_index().await.unwrap();

    assert_eq!(report.added, vec!["page"]);
    assert_eq!(report.records[0].title, "Page");
}
