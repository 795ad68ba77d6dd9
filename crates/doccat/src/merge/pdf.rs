//! PDF merge strategy.
//!
//! The page-level work is done by a [`PageContainerMerger`]. The default
//! implementation, [`LopdfPageMerger`], concatenates the page trees of the
//! inputs with `lopdf`, inserting no divider pages between documents.

use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::MergeOptions;
use crate::error::{Error, Result};
use crate::kind::DocumentKind;
use crate::merge::ContentMerger;

/// Failure reported by a [`PageContainerMerger`].
#[derive(Debug, thiserror::Error)]
pub enum PageMergeError {
    /// An input could not be parsed as a PDF.
    #[error("input #{index} is not a valid PDF: {message}")]
    Parse {
        /// Zero-based position of the input.
        index: usize,
        /// Parser message.
        message: String,
    },

    /// The page tree of an input could not be combined.
    #[error("{0}")]
    Structure(String),

    /// The merged document could not be serialized.
    #[error("failed to write merged PDF: {0}")]
    Write(String),
}

/// Capability that concatenates PDF page containers.
///
/// Given an ordered sequence of PDF byte streams, writes a single PDF to
/// `sink` containing every page of every input in input order.
pub trait PageContainerMerger: Send + Sync {
    /// Merge `inputs` into `sink`.
    fn merge_into(
        &self,
        inputs: &[Vec<u8>],
        sink: &mut dyn Write,
    ) -> std::result::Result<(), PageMergeError>;
}

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// [`PageContainerMerger`] backed by `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfPageMerger;

impl LopdfPageMerger {
    /// Create a new page merger.
    pub fn new() -> Self {
        Self
    }

    fn load(index: usize, bytes: &[u8]) -> std::result::Result<Document, PageMergeError> {
        Document::load_mem(bytes).map_err(|e| PageMergeError::Parse {
            index,
            message: e.to_string(),
        })
    }

    /// Append pages to the root page tree of `merged`.
    fn add_pages_to_tree(
        merged: &mut Document,
        page_ids: &[ObjectId],
    ) -> std::result::Result<(), PageMergeError> {
        let structure =
            |what: &str, e: lopdf::Error| PageMergeError::Structure(format!("{what}: {e}"));

        let pages_id = merged
            .catalog()
            .map_err(|e| structure("Failed to get catalog", e))?
            .get(b"Pages")
            .and_then(|p| p.as_reference())
            .map_err(|e| structure("Failed to get pages reference", e))?;

        let Object::Dictionary(dict) = merged
            .get_object_mut(pages_id)
            .map_err(|e| structure("Failed to get pages object", e))?
        else {
            return Err(PageMergeError::Structure(
                "Pages object is not a dictionary".into(),
            ));
        };

        let Ok(Object::Array(kids)) = dict.get_mut(b"Kids") else {
            return Err(PageMergeError::Structure(
                "Pages dictionary missing Kids array".into(),
            ));
        };
        kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));

        let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
        dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

        // Pages are flattened before they get here; appended pages must not
        // pick up the first document's defaults.
        for key in INHERITABLE {
            dict.remove(key);
        }

        // Re-parent the appended pages onto the merged tree
        for &page_id in page_ids {
            if let Ok(Object::Dictionary(page)) = merged.get_object_mut(page_id) {
                page.set("Parent", Object::Reference(pages_id));
            }
        }

        Ok(())
    }

    /// Copy attributes inherited through the page tree onto each page, so
    /// pages keep their size and resources once moved under another parent.
    fn flatten_inherited(doc: &mut Document, page_ids: &[ObjectId]) {
        for &page_id in page_ids {
            let inherited = Self::inherited_attributes(doc, page_id);
            if let Ok(page) = doc.get_dictionary_mut(page_id) {
                for (key, value) in inherited {
                    page.set(key, value);
                }
            }
        }
    }

    /// Inheritable attributes a page lacks, taken from its nearest ancestor.
    fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(&'static [u8], Object)> {
        let Ok(page) = doc.get_dictionary(page_id) else {
            return Vec::new();
        };

        let mut missing: Vec<&'static [u8]> =
            INHERITABLE.into_iter().filter(|key| !page.has(key)).collect();
        let mut found = Vec::new();
        let mut visited = HashSet::from([page_id]);
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

        while let Some(node_id) = parent {
            if missing.is_empty() || !visited.insert(node_id) {
                break;
            }
            let Ok(node) = doc.get_dictionary(node_id) else {
                break;
            };
            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    found.push((*key, value.clone()));
                    false
                }
                Err(_) => true,
            });
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        }

        found
    }
}

impl PageContainerMerger for LopdfPageMerger {
    fn merge_into(
        &self,
        inputs: &[Vec<u8>],
        sink: &mut dyn Write,
    ) -> std::result::Result<(), PageMergeError> {
        let Some((first, rest)) = inputs.split_first() else {
            return Err(PageMergeError::Structure("no input documents".into()));
        };

        let mut merged = Self::load(0, first)?;
        let mut max_id = merged.max_id;

        let first_pages: Vec<ObjectId> = merged.get_pages().into_values().collect();
        Self::flatten_inherited(&mut merged, &first_pages);

        for (offset, bytes) in rest.iter().enumerate() {
            let mut doc = Self::load(offset + 1, bytes)?;

            // Renumber objects to avoid ID conflicts
            doc.renumber_objects_with(max_id + 1);
            max_id = doc.max_id;

            let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
            Self::flatten_inherited(&mut doc, &doc_pages);
            merged.objects.extend(doc.objects);
            merged.max_id = max_id;

            Self::add_pages_to_tree(&mut merged, &doc_pages)?;
        }

        // Drop the catalogs and page roots of the appended documents
        merged.prune_objects();
        merged.renumber_objects();
        merged.compress();

        let mut sink = sink;
        merged
            .save_to(&mut sink)
            .map_err(|e| PageMergeError::Write(e.to_string()))?;

        Ok(())
    }
}

/// PDF implementation of [`ContentMerger`].
pub struct PdfMergeStrategy {
    pages: Box<dyn PageContainerMerger>,
}

impl PdfMergeStrategy {
    /// Create a strategy backed by [`LopdfPageMerger`].
    pub fn new() -> Self {
        Self::with_page_merger(LopdfPageMerger::new())
    }

    /// Create a strategy with a custom page merger.
    pub fn with_page_merger(pages: impl PageContainerMerger + 'static) -> Self {
        Self {
            pages: Box::new(pages),
        }
    }
}

impl Default for PdfMergeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentMerger for PdfMergeStrategy {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    fn merge_ordered(
        &self,
        files: &[PathBuf],
        output: &Path,
        _options: &MergeOptions,
    ) -> Result<()> {
        let inputs = files
            .iter()
            .map(|path| {
                std::fs::read(path).map_err(|source| Error::FileReadFailed {
                    path: path.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut merged = Vec::new();
        self.pages
            .merge_into(&inputs, &mut merged)
            .map_err(|e| Error::merge_failed(e.to_string()))?;

        let mut file = std::fs::File::create(output).map_err(|source| Error::OutputCreateFailed {
            path: output.to_path_buf(),
            source,
        })?;

        file.write_all(&merged)
            .and_then(|()| file.flush())
            .map_err(|source| Error::WriteFailed {
                path: output.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            "Wrote {} bytes of merged PDF to {}",
            merged.len(),
            output.display()
        );

        Ok(())
    }
}
