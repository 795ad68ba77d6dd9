//! The uniform outcome record returned to transport adapters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::merge::MergeReport;

/// Outcome of a merge, as serialized by the CLI and the HTTP API.
///
/// `success` is true iff `error_message` is absent, in which case
/// `output_path`, `merged_files` and `files_list` are all present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeResult {
    /// Whether the merge completed.
    pub success: bool,

    /// Path of the merged document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Number of files merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_files: Option<usize>,

    /// Why the merge failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Files merged, in merge order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_list: Option<Vec<PathBuf>>,
}

impl MergeResult {
    /// Build a successful result.
    pub fn success(output_path: PathBuf, files: Vec<PathBuf>) -> Self {
        Self {
            success: true,
            output_path: Some(output_path),
            merged_files: Some(files.len()),
            error_message: None,
            files_list: Some(files),
        }
    }

    /// Build a failed result from an error.
    pub fn failure(error: &Error) -> Self {
        Self::failure_message(error.to_string())
    }

    /// Build a failed result from a message.
    pub fn failure_message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output_path: None,
            merged_files: None,
            error_message: Some(message.into()),
            files_list: None,
        }
    }
}

impl From<MergeReport> for MergeResult {
    fn from(report: MergeReport) -> Self {
        Self::success(report.output, report.files)
    }
}

impl From<Result<MergeReport>> for MergeResult {
    fn from(result: Result<MergeReport>) -> Self {
        match result {
            Ok(report) => report.into(),
            Err(err) => Self::failure(&err),
        }
    }
}
