//! Configuration module for doccat.
//!
//! Transport adapters (the CLI and the HTTP server) translate their requests
//! into a [`MergeConfig`] and hand it to [`crate::merge::try_merge`]. The
//! config is a plain value: nothing in the library reads process-wide state,
//! so concurrent requests can each carry their own.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::kind::KindSelection;

/// Where the files to merge come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Walk a directory recursively and merge every matching file in
    /// lexicographic path order.
    Directory(PathBuf),
    /// Merge exactly these files, in the order given.
    Files(Vec<PathBuf>),
}

/// Options that shape merged content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOptions {
    /// Prefix every Markdown file with a `# <file name>` heading and separate
    /// files with a horizontal rule. Ignored for PDF.
    pub add_titles: bool,
}

/// Complete configuration for a merge operation.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Input files or directory.
    pub source: Source,

    /// Output file path.
    pub output: PathBuf,

    /// Kind of document to merge.
    pub kind: KindSelection,

    /// Content options.
    pub options: MergeOptions,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,
}

impl MergeConfig {
    /// Create a config with default options for the given source and output.
    pub fn new(source: Source, output: impl Into<PathBuf>, kind: KindSelection) -> Self {
        Self {
            source,
            output: output.into(),
            kind,
            options: MergeOptions::default(),
            verbose: false,
            quiet: false,
        }
    }

    /// Set the Markdown title option.
    pub fn with_titles(mut self, add_titles: bool) -> Self {
        self.options.add_titles = add_titles;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output path is empty
    /// - Verbose and quiet modes are both enabled
    pub fn validate(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            return Err(Error::invalid_config("Output file must be specified"));
        }

        if self.verbose && self.quiet {
            return Err(Error::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        Ok(())
    }

    /// Check if output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}

/// Make a path absolute against the current directory.
///
/// Falls back to the path unchanged when the current directory cannot be
/// determined. The path is not required to exist and symlinks are not
/// resolved.
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|err| {
        tracing::warn!(
            "Could not make {} absolute ({err}), using it as given",
            path.display()
        );
        path.to_path_buf()
    })
}
