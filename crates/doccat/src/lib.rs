//! doccat - Merge PDF or Markdown documents into a single file.
//!
//! This library resolves a directory or an explicit list of files into an
//! ordered set of documents of one kind and merges them:
//!
//! - PDF page trees are concatenated in order
//! - Markdown files are concatenated, optionally under per-file headings
//! - Temporary workspaces stage uploaded files for the HTTP adapter
//!
//! # Examples
//!
//! ## Merge a directory
//!
//! ```no_run
//! use doccat::config::{MergeConfig, Source};
//! use doccat::kind::KindSelection;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MergeConfig::new(
//!     Source::Directory("reports".into()),
//!     "merged.pdf",
//!     KindSelection::Pdf,
//! );
//!
//! let report = doccat::merge::try_merge(&config)?;
//! println!("Merged {} files into {}", report.files.len(), report.output.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Stage uploads in a workspace
//!
//! ```no_run
//! use doccat::workspace::TempWorkspace;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = TempWorkspace::new();
//! let dir = workspace.create()?;
//!
//! let body = futures::stream::iter([Ok::<_, std::io::Error>(b"# Notes".to_vec())]);
//! let uploaded = workspace.save(body, "notes.md", Some(&dir)).await?;
//! println!("Stored {} bytes", uploaded.size);
//!
//! workspace.destroy(&dir)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod kind;
pub mod merge;
pub mod output;
pub mod resolve;
pub mod utils;
pub mod workspace;

// Re-export commonly used types
pub use config::{MergeConfig, MergeOptions, Source};
pub use error::{Error, Result};
pub use kind::{DocumentKind, KindSelection};
pub use merge::{ContentMerger, MergeReport, MergeResult};
pub use resolve::{CandidateFile, ResolvedSet};
pub use workspace::{TempWorkspace, UploadedFile};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
