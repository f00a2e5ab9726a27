use axum::{
    extract::{Multipart, State},
    response::{Json, Redirect},
};
use serde::{Deserialize, Serialize};

use crate::http::response::{ApiError, ProjectsResponse, SaveResponse, SyncResponse, UploadResponse};
use crate::http::AppState;
use crate::models::project_record::ProjectMeta;
use crate::utils::error::EditorError;

/// Body of `POST /api/save`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveRequest {
    pub slug: Option<String>,
    pub html: Option<String>,
    pub meta: Option<ProjectMeta>,
}

pub async fn redirect_to_editor(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&format!("/{}", state.config.editor_page))
}

/// Store the first multipart field that carries a file name
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| EditorError::invalid_input(format!("Invalid multipart payload: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| EditorError::invalid_input(format!("Invalid upload: {}", e)))?;

        let url = state.uploader.store_image(&file_name, &bytes).await?;
        return Ok(Json(UploadResponse { ok: true, url }));
    }

    Err(EditorError::invalid_input("No file uploaded").into())
}

pub async fn save_project(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    let meta = request.meta.unwrap_or_default();
    let path = state
        .index
        .upsert_project(request.slug.as_deref().unwrap_or_default(), request.html.as_deref(), &meta)
        .await?;

    Ok(Json(SaveResponse { ok: true, path }))
}

pub async fn sync_projects(State(state): State<AppState>) -> Result<Json<SyncResponse>, ApiError> {
    let report = state.index.reconcile_index().await?;
    Ok(Json(report.into()))
}

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<ProjectsResponse>, ApiError> {
    let projects = state.index.list_projects().await?;
    Ok(Json(ProjectsResponse { ok: true, projects }))
}
