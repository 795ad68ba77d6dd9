//! Temporary workspaces for staging uploads.
//!
//! A workspace is a directory directly under the workspace root (the OS temp
//! directory by default) whose name starts with [`WORKSPACE_PREFIX`]. Uploads
//! are written into it, merges read from it, and [`TempWorkspace::destroy`]
//! removes it, refusing any path that is not such a directory.

use futures::{Stream, StreamExt};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Name prefix of every workspace directory.
pub const WORKSPACE_PREFIX: &str = "doccat-tmp-";

/// A file written into a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Full path of the stored file.
    pub path: PathBuf,

    /// Workspace the file was stored in.
    pub temp_dir: PathBuf,

    /// Stored file name.
    pub file_name: String,

    /// Number of bytes written.
    pub size: u64,
}

/// Manages workspaces under a root directory.
#[derive(Debug, Clone)]
pub struct TempWorkspace {
    root: PathBuf,
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TempWorkspace {
    /// Manage workspaces under the OS temp directory.
    pub fn new() -> Self {
        Self::with_root(std::env::temp_dir())
    }

    /// Manage workspaces under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory new workspaces are created in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a new, empty workspace and return its path.
    ///
    /// The name is the prefix, a local timestamp and eight random hex digits,
    /// so two workspaces created within the same second do not collide.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CreateFailed`] if the directory cannot be created.
    pub fn create(&self) -> Result<PathBuf> {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let entropy = uuid::Uuid::new_v4().simple().to_string();
        let path = self
            .root
            .join(format!("{WORKSPACE_PREFIX}{timestamp}-{}", &entropy[..8]));

        std::fs::create_dir_all(&path).map_err(|source| Error::CreateFailed {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Created workspace {}", path.display());
        Ok(path)
    }

    /// Stream an upload into a workspace.
    ///
    /// When `workspace` is `None` a new workspace is created first. Only the
    /// final component of `file_name` is used, so a name cannot point outside
    /// the workspace. An existing file with the same name is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `file_name` has no usable final
    /// component, [`Error::CreateFailed`] when a new workspace cannot be
    /// created, and [`Error::WriteFailed`] when the file cannot be created or
    /// the stream fails part way through.
    pub async fn save<S, B, E>(
        &self,
        stream: S,
        file_name: &str,
        workspace: Option<&Path>,
    ) -> Result<UploadedFile>
    where
        S: Stream<Item = std::result::Result<B, E>>,
        B: AsRef<[u8]>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let file_name = Path::new(file_name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::invalid_config(format!("invalid file name '{file_name}'")))?;

        let temp_dir = match workspace {
            Some(dir) => dir.to_path_buf(),
            None => self.create()?,
        };
        let path = temp_dir.join(&file_name);

        let write_err = |source: std::io::Error| Error::WriteFailed {
            path: path.clone(),
            source,
        };

        let mut file = tokio::fs::File::create(&path).await.map_err(write_err)?;
        let mut stream = std::pin::pin!(stream);
        let mut size = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| write_err(std::io::Error::other(e)))?;
            let bytes = chunk.as_ref();
            file.write_all(bytes).await.map_err(write_err)?;
            size += bytes.len() as u64;
        }

        file.flush().await.map_err(write_err)?;

        tracing::debug!("Saved {} ({size} bytes)", path.display());

        Ok(UploadedFile {
            path,
            temp_dir,
            file_name,
            size,
        })
    }

    /// List the regular files directly inside a workspace, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessFailed`] if the path is missing, is not a
    /// directory or cannot be read.
    pub fn list(&self, workspace: &Path) -> Result<Vec<PathBuf>> {
        let metadata = std::fs::metadata(workspace)
            .map_err(|e| Error::access_failed(workspace.to_path_buf(), e.to_string()))?;
        if !metadata.is_dir() {
            return Err(Error::access_failed(
                workspace.to_path_buf(),
                "not a directory",
            ));
        }

        let entries = std::fs::read_dir(workspace)
            .map_err(|e| Error::access_failed(workspace.to_path_buf(), e.to_string()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| Error::access_failed(workspace.to_path_buf(), e.to_string()))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }

    /// Recursively delete a workspace.
    ///
    /// The path is canonicalized first; it must then be a direct child of the
    /// canonical root and its name must start with [`WORKSPACE_PREFIX`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkspace`] if the guard rejects the path
    /// (including paths that do not exist) and [`Error::AccessFailed`] if
    /// removal fails.
    pub fn destroy(&self, workspace: &Path) -> Result<()> {
        let invalid = || Error::InvalidWorkspace {
            path: workspace.to_path_buf(),
        };

        let canonical = workspace.canonicalize().map_err(|_| invalid())?;
        let root = self.root.canonicalize().map_err(|_| invalid())?;

        let is_prefixed = canonical
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(WORKSPACE_PREFIX));

        if canonical.parent() != Some(root.as_path()) || !is_prefixed || !canonical.is_dir() {
            tracing::warn!("Refusing to delete {}", workspace.display());
            return Err(invalid());
        }

        std::fs::remove_dir_all(&canonical)
            .map_err(|e| Error::access_failed(canonical.clone(), e.to_string()))?;

        tracing::debug!("Destroyed workspace {}", canonical.display());
        Ok(())
    }

    /// Check whether a path names a workspace under this root.
    pub fn contains(&self, workspace: &Path) -> bool {
        let (Ok(canonical), Ok(root)) = (workspace.canonicalize(), self.root.canonicalize()) else {
            return false;
        };
        canonical.parent() == Some(root.as_path())
            && canonical
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(WORKSPACE_PREFIX))
    }
}
