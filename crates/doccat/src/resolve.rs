//! File-set resolution.
//!
//! Turns a [`Source`] into a [`ResolvedSet`]: an ordered list of files that
//! all share one [`DocumentKind`].
//!
//! Directory sources are walked recursively and sorted by full path, so the
//! merge order is reproducible regardless of how the filesystem lists
//! entries. Explicit lists keep the caller's order; invalid entries are
//! dropped and reported in [`ResolvedSet::skipped`] instead of failing the
//! whole request.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Source;
use crate::error::{Error, Result};
use crate::kind::{DocumentKind, KindSelection, file_title};

/// An ordered, validated set of files of a single kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSet {
    /// Kind shared by every file in the set.
    pub kind: DocumentKind,

    /// Files in merge order.
    pub files: Vec<PathBuf>,

    /// Explicit-list entries that were rejected.
    pub skipped: Vec<SkippedFile>,
}

/// An explicit-list entry that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// The entry as given by the caller.
    pub path: PathBuf,

    /// Why it was rejected.
    pub reason: SkipReason,
}

/// Why an explicit-list entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The path could not be stat'ed.
    Inaccessible(String),
    /// The path is a directory.
    Directory,
    /// The extension does not match the merge kind.
    WrongKind(DocumentKind),
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.reason {
            SkipReason::Inaccessible(err) => write!(f, "Cannot access file {path}: {err}, skipped"),
            SkipReason::Directory => write!(f, "{path} is a directory, not a file, skipped"),
            SkipReason::WrongKind(kind) => {
                write!(f, "{path} is not a {} file, skipped", kind.label())
            }
        }
    }
}

/// A file offered for selection in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateFile {
    /// Path to the file.
    pub path: PathBuf,

    /// File name without extension.
    pub title: String,
}

/// Resolve a source into an ordered set of files.
///
/// # Errors
///
/// Directory sources fail with [`Error::NotFound`], [`Error::NotADirectory`],
/// [`Error::ScanFailed`] or [`Error::NoMatchingFiles`]. Explicit lists fail
/// with [`Error::UnsupportedFileType`] when the kind is auto-detected from an
/// unsupported first entry, and with [`Error::NoValidFiles`] when every entry
/// is rejected.
pub fn resolve(source: &Source, wanted: KindSelection) -> Result<ResolvedSet> {
    match source {
        Source::Directory(dir) => resolve_directory(dir, wanted),
        Source::Files(files) => resolve_files(files, wanted),
    }
}

/// Resolve every matching file under `dir`, sorted by full path.
pub fn resolve_directory(dir: &Path, wanted: KindSelection) -> Result<ResolvedSet> {
    let mut files = walk(dir, |path| match wanted.fixed() {
        Some(kind) => kind.matches(path),
        None => DocumentKind::from_path(path).is_some(),
    })?;

    let kind = match wanted.fixed() {
        Some(kind) => kind,
        // Auto mode: the first path in merge order decides
        None => match files.first().and_then(|p| DocumentKind::from_path(p)) {
            Some(kind) => kind,
            None => {
                return Err(Error::NoMatchingFiles {
                    dir: dir.to_path_buf(),
                    kind: DocumentKind::Pdf,
                });
            }
        },
    };

    files.retain(|path| kind.matches(path));

    if files.is_empty() {
        return Err(Error::NoMatchingFiles {
            dir: dir.to_path_buf(),
            kind,
        });
    }

    tracing::debug!(
        "Resolved {} {} file(s) under {}",
        files.len(),
        kind.label(),
        dir.display()
    );

    Ok(ResolvedSet {
        kind,
        files,
        skipped: Vec::new(),
    })
}

/// Validate an explicit list, keeping the caller's order.
pub fn resolve_files(files: &[PathBuf], wanted: KindSelection) -> Result<ResolvedSet> {
    let kind = match wanted.fixed() {
        Some(kind) => kind,
        None => {
            let Some(first) = files.first() else {
                // Nothing to detect from; report it the same way as an
                // all-invalid PDF list.
                return Err(Error::NoValidFiles {
                    kind: DocumentKind::Pdf,
                });
            };
            DocumentKind::from_path(first)
                .ok_or_else(|| Error::unsupported(first.display().to_string()))?
        }
    };

    let mut valid = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();

    for path in files {
        match check_entry(path, kind) {
            Ok(()) => valid.push(path.clone()),
            Err(reason) => {
                let entry = SkippedFile {
                    path: path.clone(),
                    reason,
                };
                tracing::debug!("{entry}");
                skipped.push(entry);
            }
        }
    }

    if valid.is_empty() {
        return Err(Error::NoValidFiles { kind });
    }

    Ok(ResolvedSet {
        kind,
        files: valid,
        skipped,
    })
}

fn check_entry(path: &Path, kind: DocumentKind) -> std::result::Result<(), SkipReason> {
    let metadata =
        std::fs::metadata(path).map_err(|err| SkipReason::Inaccessible(err.to_string()))?;

    if metadata.is_dir() {
        return Err(SkipReason::Directory);
    }

    if !kind.matches(path) {
        return Err(SkipReason::WrongKind(kind));
    }

    Ok(())
}

/// List the files of one kind under `dir` with their titles.
///
/// Unlike [`resolve_directory`], an empty listing is not an error.
pub fn list_candidates(dir: &Path, kind: DocumentKind) -> Result<Vec<CandidateFile>> {
    let files = walk(dir, |path| kind.matches(path))?;

    Ok(files
        .into_iter()
        .map(|path| CandidateFile {
            title: file_title(&path),
            path,
        })
        .collect())
}

/// Walk `dir` recursively and return the sorted regular files accepted by
/// `keep`.
fn walk(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(dir).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::not_found(dir.to_path_buf())
        } else {
            Error::access_failed(dir.to_path_buf(), err.to_string())
        }
    })?;

    if !metadata.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|source| Error::ScanFailed {
            path: dir.to_path_buf(),
            source,
        })?;

        // Symlinked directories are not descended into, symlinked files count
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());

        if is_file && keep(entry.path()) {
            files.push(entry.into_path());
        }
    }

    // Byte-wise order of the full path; this is the merge order.
    files.sort_by(|a, b| a.as_os_str().as_encoded_bytes().cmp(b.as_os_str().as_encoded_bytes()));

    Ok(files)
}
