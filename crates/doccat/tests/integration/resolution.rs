//! Integration tests for file-set resolution.

use doccat::config::{MergeConfig, Source};
use doccat::kind::{DocumentKind, KindSelection};
use doccat::merge::try_merge;
use doccat::resolve::{list_candidates, resolve};
use serial_test::serial;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::common::{names, write_pdf, write_text};

#[test]
fn test_kind_filtering_splits_mixed_directory() {
    let temp = TempDir::new().unwrap();
    write_pdf(temp.path(), "report.pdf", 1, 612);
    write_text(temp.path(), "notes.md", "n");

    let source = Source::Directory(temp.path().to_path_buf());
    let pdfs = resolve(&source, KindSelection::Pdf).unwrap();
    let mds = resolve(&source, KindSelection::Markdown).unwrap();

    assert_eq!(names(&pdfs.files), ["report.pdf"]);
    assert_eq!(names(&mds.files), ["notes.md"]);
}

#[test]
fn test_listing_matches_resolution_order() {
    let temp = TempDir::new().unwrap();
    write_text(temp.path(), "b/intro.md", "");
    write_text(temp.path(), "a.markdown", "");
    write_text(temp.path(), "ignored.txt", "");

    let listed = list_candidates(temp.path(), DocumentKind::Markdown).unwrap();
    let resolved = resolve(
        &Source::Directory(temp.path().to_path_buf()),
        KindSelection::Markdown,
    )
    .unwrap();

    let listed_paths: Vec<PathBuf> = listed.iter().map(|c| c.path.clone()).collect();
    assert_eq!(listed_paths, resolved.files);
    assert_eq!(listed[0].title, "a");
    assert_eq!(listed[1].title, "intro");
}

#[test]
fn test_listing_empty_directory_is_ok() {
    let temp = TempDir::new().unwrap();
    assert!(list_candidates(temp.path(), DocumentKind::Pdf)
        .unwrap()
        .is_empty());
}

/// Restores the working directory when dropped.
struct CwdGuard(PathBuf);

impl CwdGuard {
    fn enter(dir: &Path) -> Self {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        Self(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.0);
    }
}

#[test]
#[serial]
fn test_relative_paths_resolve_against_cwd() {
    let temp = TempDir::new().unwrap();
    write_text(temp.path(), "docs/a.md", "A");
    let _cwd = CwdGuard::enter(temp.path());

    let config = MergeConfig::new(
        Source::Directory(PathBuf::from("docs")),
        "merged.md",
        KindSelection::Markdown,
    );
    let report = try_merge(&config).unwrap();

    assert!(report.output.is_absolute());
    assert!(report.output.ends_with("merged.md"));
    assert_eq!(report.files, vec![PathBuf::from("docs").join("a.md")]);
    assert!(temp.path().join("merged.md").exists());
}

#[test]
#[serial]
fn test_rerun_refuses_to_merge_previous_output() {
    let temp = TempDir::new().unwrap();
    write_text(temp.path(), "a.md", "A");
    let _cwd = CwdGuard::enter(temp.path());

    let config = MergeConfig::new(
        Source::Directory(PathBuf::from(".")),
        "merged.md",
        KindSelection::Markdown,
    );
    try_merge(&config).unwrap();

    let err = try_merge(&config).unwrap_err();
    assert!(matches!(err, doccat::Error::OutputIsInput { .. }));
}
