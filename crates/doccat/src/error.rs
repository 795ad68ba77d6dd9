//! Error types for doccat.
//!
//! Every fallible operation in the library returns [`Error`]. Errors carry
//! the offending path wherever one exists so that both the CLI and the HTTP
//! adapter can produce a message an operator can act on.
//!
//! # Error Categories
//!
//! - **Resolution Errors**: missing or invalid input directory, empty file sets
//! - **Merge Errors**: unreadable inputs, output creation, PDF structure failures
//! - **Workspace Errors**: temporary directory creation, upload writes, deletion guard

use std::io;
use std::path::PathBuf;

use crate::kind::DocumentKind;

/// Result type alias for doccat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for doccat operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input directory does not exist.
    #[error("{}", not_found_message(path, *absolute))]
    NotFound {
        /// Path that could not be found.
        path: PathBuf,
        /// Whether the path was given as an absolute path.
        absolute: bool,
    },

    /// Input path exists but is not a directory.
    #[error("{} is not a directory", path.display())]
    NotADirectory {
        /// Path that is not a directory.
        path: PathBuf,
    },

    /// Directory walk completed without finding a single file of the wanted kind.
    #[error("No {} files found in directory {}", kind.label(), dir.display())]
    NoMatchingFiles {
        /// Directory that was scanned.
        dir: PathBuf,
        /// Kind that was searched for.
        kind: DocumentKind,
    },

    /// Every entry of an explicit file list was rejected.
    #[error("No valid {} files to merge", kind.label())]
    NoValidFiles {
        /// Kind that was requested.
        kind: DocumentKind,
    },

    /// Directory walk failed part way through.
    #[error("Error scanning directory {}: {source}", path.display())]
    ScanFailed {
        /// Directory being scanned.
        path: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// An input file could not be read during the merge.
    #[error("Failed to read file {}: {source}", path.display())]
    FileReadFailed {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The output file could not be created.
    #[error("Cannot create output file {}: {source}", path.display())]
    OutputCreateFailed {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The output path is also one of the inputs.
    #[error("Output file cannot be the same as an input file: {}", path.display())]
    OutputIsInput {
        /// Conflicting path.
        path: PathBuf,
    },

    /// The PDF page merger rejected the inputs or failed to write.
    #[error("Failed to merge PDF files: {reason}")]
    MergeFailed {
        /// Message from the page merger.
        reason: String,
    },

    /// Deletion refused because the path is not a workspace created by doccat.
    #[error("Not a valid temporary directory: {}", path.display())]
    InvalidWorkspace {
        /// Rejected path.
        path: PathBuf,
    },

    /// A temporary workspace could not be created.
    #[error("Failed to create temporary directory {}: {source}", path.display())]
    CreateFailed {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Writing a file failed.
    #[error("Failed to write to file {}: {source}", path.display())]
    WriteFailed {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A workspace could not be listed.
    #[error("Failed to access temporary directory {}: {reason}", path.display())]
    AccessFailed {
        /// Workspace path.
        path: PathBuf,
        /// Why access failed.
        reason: String,
    },

    /// File extension is neither PDF nor Markdown.
    #[error("Unsupported file type: {name}. Only PDF or Markdown files are allowed")]
    UnsupportedFileType {
        /// Offending file name.
        name: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },
}

fn not_found_message(path: &std::path::Path, absolute: bool) -> String {
    if absolute {
        format!(
            "Specified absolute path directory does not exist: {}",
            path.display()
        )
    } else {
        format!("Specified directory does not exist: {}", path.display())
    }
}

impl Error {
    /// Create a NotFound error, recording whether the path was absolute.
    pub fn not_found(path: PathBuf) -> Self {
        let absolute = path.is_absolute();
        Self::NotFound { path, absolute }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an AccessFailed error.
    pub fn access_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::AccessFailed {
            path,
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedFileType error.
    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedFileType { name: name.into() }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check if the error was caused by caller input rather than by the
    /// environment or the merge itself.
    ///
    /// Transport adapters use this to choose between "bad request" and
    /// "internal error" responses.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::NotADirectory { .. }
                | Self::NoMatchingFiles { .. }
                | Self::NoValidFiles { .. }
                | Self::OutputIsInput { .. }
                | Self::InvalidWorkspace { .. }
                | Self::AccessFailed { .. }
                | Self::UnsupportedFileType { .. }
                | Self::InvalidConfig { .. }
        )
    }

    /// Check if the error happened while resolving the input set, before
    /// any output was touched.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::NotADirectory { .. }
                | Self::NoMatchingFiles { .. }
                | Self::NoValidFiles { .. }
                | Self::ScanFailed { .. }
                | Self::UnsupportedFileType { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_found_distinguishes_absolute_paths() {
        let abs = Error::not_found(std::env::temp_dir().join("missing-dir"));
        assert!(format!("{abs}").contains("absolute path"));

        let rel = Error::not_found(PathBuf::from("missing-dir"));
        let msg = format!("{rel}");
        assert!(msg.starts_with("Specified directory does not exist"));
        assert!(msg.contains("missing-dir"));
    }

    #[test]
    fn test_no_matching_files_display() {
        let err = Error::NoMatchingFiles {
            dir: PathBuf::from("docs"),
            kind: DocumentKind::Markdown,
        };
        assert_eq!(format!("{err}"), "No Markdown files found in directory docs");
    }

    #[test]
    fn test_file_read_failed_keeps_path_and_source() {
        let err = Error::FileReadFailed {
            path: PathBuf::from("chapter.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(format!("{err}").contains("chapter.md"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_input_error() {
        assert!(Error::not_found(PathBuf::from("x")).is_input_error());
        assert!(Error::unsupported("notes.txt").is_input_error());
        assert!(
            Error::InvalidWorkspace {
                path: PathBuf::from("/tmp/other")
            }
            .is_input_error()
        );

        assert!(!Error::merge_failed("bad xref").is_input_error());
        assert!(
            !Error::OutputCreateFailed {
                path: PathBuf::from("out.md"),
                source: io::Error::other("disk full"),
            }
            .is_input_error()
        );
    }

    #[test]
    fn test_is_resolution_error() {
        assert!(
            Error::NoValidFiles {
                kind: DocumentKind::Pdf
            }
            .is_resolution_error()
        );
        assert!(!Error::merge_failed("boom").is_resolution_error());
    }
}
