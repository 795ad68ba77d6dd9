//! Listing handlers for merge candidates.

use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use doccat::kind::DocumentKind;
use doccat::resolve::{CandidateFile, list_candidates};
use std::path::PathBuf;

use crate::dto::DirQuery;
use crate::error::HttpError;

/// List PDF files under `?dir=`.
pub async fn list_pdf(
    query: Result<Query<DirQuery>, QueryRejection>,
) -> Result<Json<Vec<CandidateFile>>, HttpError> {
    list(query, DocumentKind::Pdf).await
}

/// List Markdown files under `?dir=`.
pub async fn list_markdown(
    query: Result<Query<DirQuery>, QueryRejection>,
) -> Result<Json<Vec<CandidateFile>>, HttpError> {
    list(query, DocumentKind::Markdown).await
}

async fn list(
    query: Result<Query<DirQuery>, QueryRejection>,
    kind: DocumentKind,
) -> Result<Json<Vec<CandidateFile>>, HttpError> {
    let Query(DirQuery { dir }) = query?;
    if dir.is_empty() {
        return Err(HttpError::BadRequest(
            "Directory parameter '?dir=...' must be specified".into(),
        ));
    }

    let dir = PathBuf::from(dir);
    let files = tokio::task::spawn_blocking(move || list_candidates(&dir, kind)).await??;
    Ok(Json(files))
}
