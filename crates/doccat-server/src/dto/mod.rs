//! Data Transfer Objects (DTOs) for HTTP API contract.
//!
//! These types define the HTTP API contract with explicit serialization
//! control. Field names are camelCase on the wire.

use doccat::{DocumentKind, UploadedFile};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Body of `POST /api/merge`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeRequest {
    pub input_dir: String,
    pub output_file: String,
}

/// Body of `POST /api/merge-md`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeMdRequest {
    pub input_dir: String,
    pub output_file: String,
    pub add_titles: bool,
}

/// Body of `POST /api/merge-files`.
///
/// When `file_names` is empty every file in the workspace is merged, in
/// path order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeFilesRequest {
    pub temp_dir: String,
    pub file_names: Vec<String>,
    pub output_file: String,
    pub add_titles: bool,
}

/// Body of `DELETE /api/temp-dir`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TempDirRequest {
    pub temp_dir: String,
}

/// `?dir=` query of the listing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DirQuery {
    pub dir: String,
}

/// Response of `POST /api/temp-dir`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TempDirCreated {
    pub temp_dir: PathBuf,
    pub message: String,
}

/// Response carrying only a message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of `POST /api/upload`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub file_path: PathBuf,
    pub temp_dir: PathBuf,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: DocumentKind,
}

impl UploadResponse {
    pub fn new(uploaded: UploadedFile, file_type: DocumentKind) -> Self {
        Self {
            success: true,
            file_path: uploaded.path,
            temp_dir: uploaded.temp_dir,
            file_name: uploaded.file_name,
            file_size: uploaded.size,
            file_type,
        }
    }
}

/// Response of `GET /api/temp-files`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TempFilesResponse {
    pub temp_dir: PathBuf,
    pub all_files: Vec<PathBuf>,
    pub pdf_files: Vec<PathBuf>,
    pub md_files: Vec<PathBuf>,
    pub total_files: usize,
}

impl TempFilesResponse {
    /// Split a workspace listing by kind.
    pub fn new(temp_dir: PathBuf, all_files: Vec<PathBuf>) -> Self {
        let of_kind = |kind: DocumentKind| -> Vec<PathBuf> {
            all_files
                .iter()
                .filter(|path| kind.matches(path))
                .cloned()
                .collect()
        };

        Self {
            pdf_files: of_kind(DocumentKind::Pdf),
            md_files: of_kind(DocumentKind::Markdown),
            total_files: all_files.len(),
            temp_dir,
            all_files,
        }
    }
}
