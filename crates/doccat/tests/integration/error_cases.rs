//! Integration tests for error handling and edge cases.

use doccat::config::{MergeConfig, Source};
use doccat::error::Error;
use doccat::kind::{DocumentKind, KindSelection};
use doccat::merge::{self, try_merge};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{write_pdf, write_text};

#[test]
fn test_error_missing_directory() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");

    let config = MergeConfig::new(
        Source::Directory(missing.clone()),
        temp.path().join("out.pdf"),
        KindSelection::Pdf,
    );
    let err = try_merge(&config).unwrap_err();

    assert!(matches!(err, Error::NotFound { absolute: true, .. }));
    assert!(err.to_string().contains(&missing.display().to_string()));
}

#[test]
fn test_error_input_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file = write_text(temp.path(), "a.md", "A");

    let config = MergeConfig::new(
        Source::Directory(file),
        temp.path().join("out.md"),
        KindSelection::Markdown,
    );
    assert!(matches!(
        try_merge(&config),
        Err(Error::NotADirectory { .. })
    ));
}

#[test]
fn test_empty_set_reports_failure_without_output() {
    let temp = TempDir::new().unwrap();
    write_text(temp.path(), "readme.txt", "not markdown");
    let output = temp.path().join("merged.md");

    let config = MergeConfig::new(
        Source::Directory(temp.path().to_path_buf()),
        &output,
        KindSelection::Markdown,
    );
    let result = merge::merge(&config);

    assert!(!result.success);
    assert_eq!(
        result.error_message.as_deref(),
        Some(format!("No Markdown files found in directory {}", temp.path().display()).as_str())
    );
    assert!(result.output_path.is_none());
    assert!(!output.exists());
}

#[test]
fn test_explicit_list_all_invalid() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("sub.md");
    std::fs::create_dir(&dir).unwrap();

    let config = MergeConfig::new(
        Source::Files(vec![temp.path().join("missing.md"), dir]),
        temp.path().join("out.md"),
        KindSelection::Markdown,
    );
    let err = try_merge(&config).unwrap_err();

    assert!(matches!(
        err,
        Error::NoValidFiles {
            kind: DocumentKind::Markdown
        }
    ));
    assert!(err.is_input_error());
}

#[test]
fn test_unsupported_first_entry_in_auto_mode() {
    let config = MergeConfig::new(
        Source::Files(vec![PathBuf::from("slides.pptx"), PathBuf::from("a.pdf")]),
        "out.pdf",
        KindSelection::Auto,
    );
    assert!(matches!(
        try_merge(&config),
        Err(Error::UnsupportedFileType { .. })
    ));
}

#[test]
fn test_corrupted_pdf_is_merge_failure() {
    let temp = TempDir::new().unwrap();
    let good = write_pdf(temp.path(), "a.pdf", 1, 612);
    let bad = write_text(temp.path(), "b.pdf", "this is not a pdf");
    let output = temp.path().join("out.pdf");

    let config = MergeConfig::new(Source::Files(vec![good, bad]), &output, KindSelection::Pdf);
    let err = try_merge(&config).unwrap_err();

    assert!(matches!(err, Error::MergeFailed { .. }));
    assert!(!err.is_input_error());
    assert!(!output.exists());
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let mut config = MergeConfig::new(
        Source::Directory(PathBuf::from(".")),
        "merged.pdf",
        KindSelection::Pdf,
    );
    config.verbose = true;
    config.quiet = true;

    assert!(matches!(
        try_merge(&config),
        Err(Error::InvalidConfig { .. })
    ));
}
