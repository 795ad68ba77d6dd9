//! Markdown merge strategy.
//!
//! Files are concatenated byte for byte. With titles enabled every file is
//! introduced by a level-1 heading built from its file name and files are
//! separated by a horizontal rule; otherwise they are separated by a blank
//! line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::MergeOptions;
use crate::error::{Error, Result};
use crate::kind::{DocumentKind, file_title};
use crate::merge::ContentMerger;

/// Written between files when titles are enabled.
const TITLED_SEPARATOR: &[u8] = b"\n\n---\n\n";

/// Written between files when titles are disabled.
const PLAIN_SEPARATOR: &[u8] = b"\n\n";

/// Markdown implementation of [`ContentMerger`].
#[derive(Debug, Clone, Default)]
pub struct MarkdownMergeStrategy;

impl MarkdownMergeStrategy {
    /// Create a new Markdown strategy.
    pub fn new() -> Self {
        Self
    }
}

impl ContentMerger for MarkdownMergeStrategy {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Markdown
    }

    fn merge_ordered(
        &self,
        files: &[PathBuf],
        output: &Path,
        options: &MergeOptions,
    ) -> Result<()> {
        let file = File::create(output).map_err(|source| Error::OutputCreateFailed {
            path: output.to_path_buf(),
            source,
        })?;
        let mut out = BufWriter::new(file);

        let write_err = |source: std::io::Error| Error::WriteFailed {
            path: output.to_path_buf(),
            source,
        };

        for (i, path) in files.iter().enumerate() {
            let content = std::fs::read(path).map_err(|source| Error::FileReadFailed {
                path: path.clone(),
                source,
            })?;

            if options.add_titles {
                if i > 0 {
                    out.write_all(TITLED_SEPARATOR).map_err(write_err)?;
                }
                write!(out, "# {}\n\n", file_title(path)).map_err(write_err)?;
            } else if i > 0 {
                out.write_all(PLAIN_SEPARATOR).map_err(write_err)?;
            }

            out.write_all(&content).map_err(write_err)?;
            tracing::debug!("Appended {} ({} bytes)", path.display(), content.len());
        }

        out.flush().map_err(write_err)?;

        Ok(())
    }
}
