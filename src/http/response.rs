use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::models::project_record::ProjectRecord;
use crate::models::sync_report::SyncReport;
use crate::utils::error::EditorError;

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub ok: bool,
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub ok: bool,
    pub projects: Vec<ProjectRecord>,
    pub added: Vec<String>,
    pub removed_count: usize,
    pub message: String,
}

impl From<SyncReport> for SyncResponse {
    fn from(report: SyncReport) -> Self {
        let message = report.summary();
        Self {
            ok: true,
            projects: report.records,
            added: report.added,
            removed_count: report.removed_count,
            message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub ok: bool,
    pub projects: Vec<ProjectRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

/// Handler error: 400 for caller mistakes, 500 for everything else
#[derive(Debug)]
pub struct ApiError(pub EditorError);

impl From<EditorError> for ApiError {
    fn from(err: EditorError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %self.0, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = ErrorResponse {
            ok: false,
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
