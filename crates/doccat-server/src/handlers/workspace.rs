//! Workspace handlers: create, upload, list and delete.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Multipart, Query, State};
use doccat::kind::DocumentKind;
use std::path::{Path, PathBuf};

use crate::dto::{
    DirQuery, MessageResponse, TempDirCreated, TempDirRequest, TempFilesResponse, UploadResponse,
};
use crate::error::HttpError;
use crate::state::AppState;

/// Create a new workspace.
pub async fn create(State(state): State<AppState>) -> Result<Json<TempDirCreated>, HttpError> {
    let workspace = state.workspace.clone();
    let temp_dir = tokio::task::spawn_blocking(move || workspace.create()).await??;

    tracing::info!("Created workspace {}", temp_dir.display());

    Ok(Json(TempDirCreated {
        temp_dir,
        message: "Temporary directory created successfully".into(),
    }))
}

/// Delete a workspace.
pub async fn destroy(
    State(state): State<AppState>,
    payload: Result<Json<TempDirRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, HttpError> {
    let Json(TempDirRequest { temp_dir }) = payload?;
    if temp_dir.is_empty() {
        return Err(HttpError::BadRequest(
            "Temporary directory path must be specified".into(),
        ));
    }
    let temp_dir = PathBuf::from(temp_dir);

    {
        let _guard = state.locks.lock(&temp_dir).await;
        let workspace = state.workspace.clone();
        let target = temp_dir.clone();
        tokio::task::spawn_blocking(move || workspace.destroy(&target)).await??;
    }
    state.locks.forget(&temp_dir);

    tracing::info!("Deleted workspace {}", temp_dir.display());

    Ok(Json(MessageResponse {
        message: "Temporary directory deleted successfully".into(),
    }))
}

/// Store an uploaded file in a workspace.
///
/// Multipart fields:
/// - `tempDir` (optional): workspace to store into; must precede `file`.
///   A new workspace is created when absent.
/// - `file`: the document, `.pdf`, `.md` or `.markdown`.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpError> {
    let mut temp_dir: Option<PathBuf> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("tempDir") => {
                let value = field.text().await?;
                if !value.is_empty() {
                    temp_dir = Some(PathBuf::from(value));
                }
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let Some(kind) = DocumentKind::from_path(Path::new(&file_name)) else {
                    return Err(HttpError::BadRequest(
                        "Unsupported file type, only PDF or Markdown files can be uploaded".into(),
                    ));
                };

                let _guard = match &temp_dir {
                    Some(dir) => Some(state.locks.lock(dir).await),
                    None => None,
                };

                let uploaded = state
                    .workspace
                    .save(field, &file_name, temp_dir.as_deref())
                    .await?;

                tracing::info!(
                    "Uploaded {} ({} bytes) to {}",
                    uploaded.file_name,
                    uploaded.size,
                    uploaded.temp_dir.display()
                );

                return Ok(Json(UploadResponse::new(uploaded, kind)));
            }
            _ => {}
        }
    }

    Err(HttpError::BadRequest("No file field in upload".into()))
}

/// List the files of a workspace, split by kind.
pub async fn list_files(
    State(state): State<AppState>,
    query: Result<Query<DirQuery>, QueryRejection>,
) -> Result<Json<TempFilesResponse>, HttpError> {
    let Query(DirQuery { dir }) = query?;
    if dir.is_empty() {
        return Err(HttpError::BadRequest(
            "Temporary directory parameter '?dir=...' must be specified".into(),
        ));
    }
    let temp_dir = PathBuf::from(dir);

    let workspace = state.workspace.clone();
    let target = temp_dir.clone();
    let files = tokio::task::spawn_blocking(move || workspace.list(&target)).await??;

    Ok(Json(TempFilesResponse::new(temp_dir, files)))
}
