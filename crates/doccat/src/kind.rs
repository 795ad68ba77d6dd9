//! Document kinds and extension detection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The content model of a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF documents, merged page by page.
    Pdf,
    /// Markdown documents, merged as text.
    Markdown,
}

impl DocumentKind {
    /// Lowercase extensions (without the dot) that belong to this kind.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Pdf => &["pdf"],
            Self::Markdown => &["md", "markdown"],
        }
    }

    /// Detect the kind of a path from its extension, case-insensitively.
    ///
    /// Returns `None` for paths without an extension or with an extension
    /// that is neither PDF nor Markdown.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [Self::Pdf, Self::Markdown]
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext.as_str()))
    }

    /// Check whether a path carries one of this kind's extensions.
    pub fn matches(&self, path: &Path) -> bool {
        Self::from_path(path) == Some(*self)
    }

    /// Human readable label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Markdown => "Markdown",
        }
    }

    /// MIME type used when serving merged output.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Markdown => "text/markdown; charset=utf-8",
        }
    }

    /// Default output file name for this kind.
    pub fn default_output(&self) -> &'static str {
        match self {
            Self::Pdf => "merged.pdf",
            Self::Markdown => "merged.md",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Which kind a resolution should look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindSelection {
    /// Only PDF files.
    Pdf,
    /// Only Markdown files.
    Markdown,
    /// Whatever kind the first file implies.
    #[default]
    Auto,
}

impl From<DocumentKind> for KindSelection {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Pdf => Self::Pdf,
            DocumentKind::Markdown => Self::Markdown,
        }
    }
}

impl KindSelection {
    /// The fixed kind, if one was selected.
    pub fn fixed(&self) -> Option<DocumentKind> {
        match self {
            Self::Pdf => Some(DocumentKind::Pdf),
            Self::Markdown => Some(DocumentKind::Markdown),
            Self::Auto => None,
        }
    }
}

/// File name without its extension, as used for titles and listings.
pub fn file_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
