//! Merge handlers.
//!
//! Merges run on the blocking pool. Every handler answers with a
//! `MergeResult` body, including on failure.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use doccat::config::{MergeConfig, Source, absolutize};
use doccat::kind::{DocumentKind, KindSelection};
use doccat::MergeReport;
use doccat::merge::try_merge;
use std::path::{Path, PathBuf};

use crate::dto::{MergeFilesRequest, MergeMdRequest, MergeRequest};
use crate::error::{HttpError, MergeResponse};
use crate::state::AppState;

/// Merge every PDF under a directory.
pub async fn merge_pdf(payload: Result<Json<MergeRequest>, JsonRejection>) -> MergeResponse {
    pdf_directory(payload).await.into()
}

/// Merge every Markdown file under a directory.
pub async fn merge_markdown(
    payload: Result<Json<MergeMdRequest>, JsonRejection>,
) -> MergeResponse {
    markdown_directory(payload).await.into()
}

/// Merge files staged in a workspace.
///
/// The kind is detected from the first file; files of the other kind are
/// skipped.
pub async fn merge_files(
    State(state): State<AppState>,
    payload: Result<Json<MergeFilesRequest>, JsonRejection>,
) -> MergeResponse {
    workspace_files(state, payload).await.into()
}

async fn pdf_directory(
    payload: Result<Json<MergeRequest>, JsonRejection>,
) -> Result<MergeReport, HttpError> {
    let Json(req) = payload?;
    let input = required(&req.input_dir, "Input directory must be specified")?;

    let config = MergeConfig::new(
        Source::Directory(input.into()),
        output_or_default(&req.output_file, DocumentKind::Pdf),
        KindSelection::Pdf,
    );
    run_merge(config).await
}

async fn markdown_directory(
    payload: Result<Json<MergeMdRequest>, JsonRejection>,
) -> Result<MergeReport, HttpError> {
    let Json(req) = payload?;
    let input = required(&req.input_dir, "Input directory must be specified")?;

    let config = MergeConfig::new(
        Source::Directory(input.into()),
        output_or_default(&req.output_file, DocumentKind::Markdown),
        KindSelection::Markdown,
    )
    .with_titles(req.add_titles);
    run_merge(config).await
}

async fn workspace_files(
    state: AppState,
    payload: Result<Json<MergeFilesRequest>, JsonRejection>,
) -> Result<MergeReport, HttpError> {
    let Json(req) = payload?;
    let temp_dir = PathBuf::from(required(
        &req.temp_dir,
        "Temporary directory must be specified",
    )?);
    let output = required(&req.output_file, "Output file name must be specified")?;

    let _guard = state.locks.lock(&temp_dir).await;

    let files = if req.file_names.is_empty() {
        let workspace = state.workspace.clone();
        let dir = temp_dir.clone();
        tokio::task::spawn_blocking(move || workspace.list(&dir)).await??
    } else {
        req.file_names
            .iter()
            .map(|name| workspace_entry(&temp_dir, name))
            .collect()
    };

    if files.is_empty() {
        return Err(HttpError::BadRequest("No files found to merge".into()));
    }

    let config = MergeConfig::new(
        Source::Files(files),
        absolutize(Path::new(output)),
        KindSelection::Auto,
    )
    .with_titles(req.add_titles);
    run_merge(config).await
}

async fn run_merge(config: MergeConfig) -> Result<MergeReport, HttpError> {
    let report = tokio::task::spawn_blocking(move || try_merge(&config)).await??;

    for skipped in &report.skipped {
        tracing::debug!("{skipped}");
    }

    Ok(report)
}

fn required<'a>(value: &'a str, message: &str) -> Result<&'a str, HttpError> {
    if value.is_empty() {
        Err(HttpError::BadRequest(message.to_string()))
    } else {
        Ok(value)
    }
}

/// Absolute output path, falling back to the kind's default name.
fn output_or_default(output: &str, kind: DocumentKind) -> PathBuf {
    let output = if output.is_empty() {
        kind.default_output()
    } else {
        output
    };
    absolutize(Path::new(output))
}

/// Join a client-supplied name onto the workspace, keeping only its final
/// component.
fn workspace_entry(temp_dir: &Path, name: &str) -> PathBuf {
    match Path::new(name).file_name() {
        Some(file_name) => temp_dir.join(file_name),
        // Left for resolution to report as skipped
        None => temp_dir.join(name),
    }
}
