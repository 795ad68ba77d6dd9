//! Integration tests for upload workspaces.

use doccat::config::{MergeConfig, Source};
use doccat::error::Error;
use doccat::kind::{DocumentKind, KindSelection};
use doccat::merge::try_merge;
use doccat::workspace::{TempWorkspace, WORKSPACE_PREFIX};
use futures::stream;
use tempfile::TempDir;

fn body(bytes: Vec<u8>) -> impl futures::Stream<Item = std::io::Result<Vec<u8>>> + Unpin {
    stream::iter(vec![Ok(bytes)])
}

#[tokio::test]
async fn test_upload_size_matches_bytes_on_disk() {
    let root = TempDir::new().unwrap();
    let ws = TempWorkspace::with_root(root.path());

    let payload = vec![7u8; 64 * 1024 + 3];
    let uploaded = ws.save(body(payload.clone()), "big.pdf", None).await.unwrap();

    assert_eq!(uploaded.size, payload.len() as u64);
    assert_eq!(std::fs::read(&uploaded.path).unwrap(), payload);
}

#[tokio::test]
async fn test_upload_then_merge_workspace_listing() {
    let root = TempDir::new().unwrap();
    let ws = TempWorkspace::with_root(root.path());
    let dir = ws.create().unwrap();

    ws.save(body(b"second".to_vec()), "b.md", Some(&dir))
        .await
        .unwrap();
    ws.save(body(b"first".to_vec()), "a.md", Some(&dir))
        .await
        .unwrap();

    let files = ws.list(&dir).unwrap();
    let output = root.path().join("merged.md");
    let config =
        MergeConfig::new(Source::Files(files), &output, KindSelection::Auto).with_titles(true);
    let report = try_merge(&config).unwrap();

    assert_eq!(report.kind, DocumentKind::Markdown);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "# a\n\nfirst\n\n---\n\n# b\n\nsecond"
    );
}

#[test]
fn test_destroy_guard_and_cleanup() {
    let root = TempDir::new().unwrap();
    let ws = TempWorkspace::with_root(root.path());

    let plain = root.path().join("keep-me");
    std::fs::create_dir(&plain).unwrap();
    assert!(matches!(
        ws.destroy(&plain),
        Err(Error::InvalidWorkspace { .. })
    ));
    assert!(plain.is_dir());

    let dir = ws.create().unwrap();
    assert!(dir
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with(WORKSPACE_PREFIX));
    ws.destroy(&dir).unwrap();
    assert!(matches!(ws.list(&dir), Err(Error::AccessFailed { .. })));
}

#[test]
fn test_destroy_missing_workspace_is_rejected() {
    let root = TempDir::new().unwrap();
    let ws = TempWorkspace::with_root(root.path());
    let gone = root.path().join(format!("{WORKSPACE_PREFIX}gone"));

    assert!(matches!(ws.destroy(&gone), Err(Error::InvalidWorkspace { .. })));
}
