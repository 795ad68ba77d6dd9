//! Integration tests for end-to-end merges.

use doccat::config::{MergeConfig, Source};
use doccat::kind::{DocumentKind, KindSelection};
use doccat::merge::{self, try_merge};
use tempfile::TempDir;

use crate::common::{names, page_widths, write_pdf, write_text};

#[test]
fn test_merge_pdf_directory_in_path_order() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in");
    write_pdf(&input, "b.pdf", 1, 200);
    write_pdf(&input, "a.pdf", 2, 100);
    write_pdf(&input, "c.pdf", 1, 300);
    let output = temp.path().join("merged.pdf");

    let config = MergeConfig::new(Source::Directory(input), &output, KindSelection::Pdf);
    let report = try_merge(&config).unwrap();

    assert_eq!(names(&report.files), ["a.pdf", "b.pdf", "c.pdf"]);
    assert_eq!(page_widths(&output), vec![100, 100, 200, 300]);
}

#[test]
fn test_merge_pdf_explicit_list_keeps_caller_order() {
    let temp = TempDir::new().unwrap();
    let a = write_pdf(temp.path(), "a.pdf", 1, 100);
    let z = write_pdf(temp.path(), "z.pdf", 1, 900);
    let output = temp.path().join("out.pdf");

    let config = MergeConfig::new(Source::Files(vec![z, a]), &output, KindSelection::Pdf);
    let result = merge::merge(&config);

    assert!(result.success);
    assert_eq!(result.merged_files, Some(2));
    assert_eq!(page_widths(&output), vec![900, 100]);
}

#[test]
fn test_merge_markdown_with_titles() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("docs");
    write_text(&input, "one.md", "A");
    write_text(&input, "two.md", "B");
    let output = temp.path().join("merged.md");

    let config = MergeConfig::new(Source::Directory(input), &output, KindSelection::Markdown)
        .with_titles(true);
    try_merge(&config).unwrap();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "# one\n\nA\n\n---\n\n# two\n\nB"
    );
}

#[test]
fn test_merge_markdown_without_titles() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("docs");
    write_text(&input, "one.md", "A");
    write_text(&input, "two.md", "B");
    let output = temp.path().join("merged.md");

    let config = MergeConfig::new(Source::Directory(input), &output, KindSelection::Markdown);
    try_merge(&config).unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "A\n\nB");
}

#[test]
fn test_merge_markdown_explicit_order() {
    let temp = TempDir::new().unwrap();
    let z = write_text(temp.path(), "z.md", "Z");
    let a = write_text(temp.path(), "a.md", "A");
    let output = temp.path().join("out.md");

    let config = MergeConfig::new(Source::Files(vec![z, a]), &output, KindSelection::Markdown);
    try_merge(&config).unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Z\n\nA");
}

#[test]
fn test_auto_kind_dispatches_on_first_file() {
    let temp = TempDir::new().unwrap();
    let md = write_text(temp.path(), "notes.md", "N");
    let pdf = write_pdf(temp.path(), "scan.pdf", 1, 612);
    let output = temp.path().join("out.md");

    let config = MergeConfig::new(
        Source::Files(vec![md.clone(), pdf.clone()]),
        &output,
        KindSelection::Auto,
    );
    let report = try_merge(&config).unwrap();

    assert_eq!(report.kind, DocumentKind::Markdown);
    assert_eq!(report.files, vec![md]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, pdf);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "N");
}

#[test]
fn test_result_serializes_for_adapters() {
    let temp = TempDir::new().unwrap();
    let a = write_text(temp.path(), "a.md", "A");
    let output = temp.path().join("out.md");

    let config = MergeConfig::new(Source::Files(vec![a.clone()]), &output, KindSelection::Auto);
    let json = serde_json::to_value(merge::merge(&config)).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["mergedFiles"], 1);
    assert_eq!(json["outputPath"], output.display().to_string());
    assert_eq!(json["filesList"][0], a.display().to_string());
    assert!(json.get("errorMessage").is_none());
}
