//! Utilities for path collection and size formatting.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Characters that make an argument a glob pattern rather than a path.
const GLOB_CHARS: &[char] = &['*', '?', '['];

/// Expand `--files` arguments into paths, keeping argument order.
///
/// Plain arguments are passed through untouched, even when they do not
/// exist, so that resolution can report them as skipped. Arguments that
/// contain wildcard characters are expanded with `glob`, each pattern's
/// matches in the order `glob` yields them (sorted).
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for malformed patterns or unreadable
/// matches.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if pattern.contains(GLOB_CHARS) {
            resolved_paths.extend(collect_paths_for_pattern(pattern)?);
        } else {
            resolved_paths.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"chapters/*.md"`
/// - `"./docs/**/*.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .map_err(|err| Error::invalid_config(format!("invalid pattern '{pattern}': {err}")))?;

    let resolved_paths = paths
        .map(|entry| entry.map_err(|err| Error::invalid_config(err.to_string())))
        .collect::<Result<Vec<_>>>()?;

    if resolved_paths.is_empty() {
        tracing::warn!("Pattern '{pattern}' matched no files");
    }

    Ok(resolved_paths)
}

/// Format a byte count as a human-readable string.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_plain_paths_pass_through_in_order() {
        let paths = collect_paths_for_patterns(["z.md", "missing.md", "a.md"]).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("z.md"),
                PathBuf::from("missing.md"),
                PathBuf::from("a.md")
            ]
        );
    }

    #[test]
    fn test_patterns_are_expanded() {
        let temp = TempDir::new().unwrap();
        for name in ["b.pdf", "a.pdf", "notes.md"] {
            std::fs::write(temp.path().join(name), b"x").unwrap();
        }

        let pattern = format!("{}/*.pdf", temp.path().display());
        let first = temp.path().join("first.md").display().to_string();
        let paths = collect_paths_for_patterns(vec![first.clone(), pattern]).unwrap();

        assert_eq!(
            paths,
            vec![
                PathBuf::from(first),
                temp.path().join("a.pdf"),
                temp.path().join("b.pdf")
            ]
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let err = collect_paths_for_patterns(["[unclosed"]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[rstest]
    #[case(0, "0 bytes")]
    #[case(512, "512 bytes")]
    #[case(1024, "1.00 KB")]
    #[case(1536, "1.50 KB")]
    #[case(1024 * 1024, "1.00 MB")]
    #[case(3 * 1024 * 1024 * 1024, "3.00 GB")]
    fn test_format_file_size(#[case] bytes: u64, #[case] expected: &str) {
        assert_eq!(format_file_size(bytes), expected);
    }
}
