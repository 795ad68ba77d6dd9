//! Merge orchestration.
//!
//! A merge runs in three steps:
//!
//! 1. The [`MergeConfig`] is validated.
//! 2. The source is resolved into an ordered [`ResolvedSet`] of one kind.
//! 3. The [`ContentMerger`] for that kind writes the output.
//!
//! [`try_merge`] returns a typed [`MergeReport`]; [`merge`] folds it into the
//! serializable [`MergeResult`] that transport adapters hand to callers.
//!
//! # Examples
//!
//! ```no_run
//! use doccat::config::{MergeConfig, Source};
//! use doccat::kind::KindSelection;
//! use doccat::merge;
//!
//! let config = MergeConfig::new(
//!     Source::Directory("chapters".into()),
//!     "book.md",
//!     KindSelection::Markdown,
//! )
//! .with_titles(true);
//!
//! let result = merge::merge(&config);
//! assert!(result.success);
//! ```

pub mod markdown;
pub mod pdf;
pub mod result;

pub use markdown::MarkdownMergeStrategy;
pub use pdf::{LopdfPageMerger, PageContainerMerger, PageMergeError, PdfMergeStrategy};
pub use result::MergeResult;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{MergeConfig, MergeOptions, absolutize};
use crate::error::{Error, Result};
use crate::kind::DocumentKind;
use crate::resolve::{ResolvedSet, SkippedFile, resolve};
use crate::utils::format_file_size;

/// A strategy that writes an ordered set of same-kind files into one output.
pub trait ContentMerger: Send + Sync {
    /// Kind of document this strategy merges.
    fn kind(&self) -> DocumentKind;

    /// Merge `files`, in order, into `output`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutputCreateFailed`], [`Error::FileReadFailed`],
    /// [`Error::WriteFailed`] or [`Error::MergeFailed`].
    fn merge_ordered(&self, files: &[PathBuf], output: &Path, options: &MergeOptions) -> Result<()>;
}

impl DocumentKind {
    /// The default strategy for this kind.
    pub fn merger(&self) -> Box<dyn ContentMerger> {
        match self {
            Self::Pdf => Box::new(PdfMergeStrategy::new()),
            Self::Markdown => Box::new(MarkdownMergeStrategy::new()),
        }
    }
}

/// Statistics about a completed merge.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of files merged.
    pub files_merged: usize,

    /// Total size of the input files in bytes.
    pub input_size: u64,

    /// Size of the written output in bytes.
    pub output_size: u64,

    /// Wall time spent in the strategy.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Detailed outcome of a successful merge.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Kind that was merged.
    pub kind: DocumentKind,

    /// Absolute path of the written output.
    pub output: PathBuf,

    /// Files merged, in merge order.
    pub files: Vec<PathBuf>,

    /// Explicit-list entries that were rejected during resolution.
    pub skipped: Vec<SkippedFile>,

    /// Merge statistics.
    pub statistics: MergeStatistics,
}

/// Run a merge and return a detailed report.
///
/// # Errors
///
/// Returns the first error hit while validating the config, resolving the
/// source or writing the output. Resolution errors leave the output
/// untouched.
pub fn try_merge(config: &MergeConfig) -> Result<MergeReport> {
    config.validate()?;

    let ResolvedSet {
        kind,
        files,
        skipped,
    } = resolve(&config.source, config.kind)?;

    let output = absolutize(&config.output);
    let target = comparable(&output);
    if let Some(conflict) = files.iter().find(|file| comparable(file) == target) {
        return Err(Error::OutputIsInput {
            path: conflict.clone(),
        });
    }

    run_merger(kind.merger().as_ref(), files, skipped, output, &config.options)
}

/// Path used to detect an output that overwrites an input.
///
/// The parent directory is canonicalized so `..` segments and symlinked
/// directories compare equal; the output file itself may not exist yet.
fn comparable(path: &Path) -> PathBuf {
    let path = absolutize(path);
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => parent.join(name),
            Err(_) => path,
        },
        _ => path,
    }
}

/// Run a merge with a specific strategy on an already resolved set.
///
/// Used by callers that supply their own [`ContentMerger`], such as a PDF
/// strategy with a custom page merger.
pub fn merge_with(
    merger: &dyn ContentMerger,
    set: ResolvedSet,
    output: &Path,
    options: &MergeOptions,
) -> Result<MergeReport> {
    if set.kind != merger.kind() {
        return Err(Error::merge_failed(format!(
            "{} strategy cannot merge {} files",
            merger.kind().label(),
            set.kind.label()
        )));
    }

    run_merger(merger, set.files, set.skipped, absolutize(output), options)
}

fn run_merger(
    merger: &dyn ContentMerger,
    files: Vec<PathBuf>,
    skipped: Vec<SkippedFile>,
    output: PathBuf,
    options: &MergeOptions,
) -> Result<MergeReport> {
    let input_size = files
        .iter()
        .filter_map(|path| std::fs::metadata(path).ok())
        .map(|meta| meta.len())
        .sum();

    tracing::debug!(
        "Merging {} {} file(s) into {}",
        files.len(),
        merger.kind().label(),
        output.display()
    );

    let start = Instant::now();
    merger.merge_ordered(&files, &output, options)?;
    let merge_time = start.elapsed();

    let output_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);

    tracing::info!(
        "Merged {} file(s) into {} in {:.2}s",
        files.len(),
        output.display(),
        merge_time.as_secs_f64()
    );

    Ok(MergeReport {
        kind: merger.kind(),
        statistics: MergeStatistics {
            files_merged: files.len(),
            input_size,
            output_size,
            merge_time,
        },
        output,
        files,
        skipped,
    })
}

/// Run a merge and fold the outcome into a [`MergeResult`].
pub fn merge(config: &MergeConfig) -> MergeResult {
    let result = try_merge(config);
    if let Err(err) = &result {
        tracing::warn!("Merge failed: {err}");
    }
    result.into()
}
