//! Download handler for merged documents.

use axum::body::Body;
use axum::extract::Path;
use axum::http::{HeaderValue, header};
use axum::response::Response;
use doccat::kind::DocumentKind;
use std::path::PathBuf;
use tokio_util::io::ReaderStream;

use crate::error::HttpError;

/// Stream a file back to the client as an attachment.
///
/// The path is the percent-decoded remainder of the URL, so absolute paths
/// are sent with their slashes encoded (`/api/download/%2Ftmp%2Fmerged.pdf`).
pub async fn download(Path(path): Path<String>) -> Result<Response, HttpError> {
    if path.is_empty() {
        return Err(HttpError::BadRequest("File path must be specified".into()));
    }
    let path = PathBuf::from(path);

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| HttpError::NotFound(format!("Cannot access file: {e}")))?;
    let metadata = file
        .metadata()
        .await
        .map_err(|e| HttpError::Internal(format!("Cannot read file information: {e}")))?;
    if !metadata.is_file() {
        return Err(HttpError::NotFound(format!(
            "Cannot access file: {} is not a file",
            path.display()
        )));
    }

    let content_type = DocumentKind::from_path(&path)
        .map(|kind| kind.content_type())
        .unwrap_or("application/octet-stream");
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    tracing::debug!("Serving {} ({} bytes)", path.display(), metadata.len());

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, metadata.len())
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| HttpError::Internal(e.to_string()))
}
