//! Shared application state.
//!
//! Defines the `AppState` type used across all handlers and routers.

use doccat::TempWorkspace;
use doccat::config::absolutize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OwnedMutexGuard;

/// Application state shared across all handlers.
pub type AppState = Arc<ServerContext>;

/// Services needed by the handlers.
#[derive(Debug)]
pub struct ServerContext {
    /// Workspace manager for uploads.
    pub workspace: TempWorkspace,
    /// Serializes writers per workspace.
    pub locks: WorkspaceLocks,
}

impl ServerContext {
    /// Create a context around a workspace manager.
    pub fn new(workspace: TempWorkspace) -> Self {
        Self {
            workspace,
            locks: WorkspaceLocks::default(),
        }
    }
}

/// Registry of per-workspace async mutexes.
///
/// Upload, merge and delete on the same workspace take its lock, so a
/// workspace is never deleted while a merge is reading from it.
#[derive(Debug, Default)]
pub struct WorkspaceLocks {
    inner: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl WorkspaceLocks {
    /// Wait for exclusive access to `workspace`.
    pub async fn lock(&self, workspace: &Path) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.entry(absolutize(workspace)).or_default().clone()
        };
        mutex.lock_owned().await
    }

    /// Drop the lock entry of a deleted workspace.
    pub fn forget(&self, workspace: &Path) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&absolutize(workspace));
    }

    /// Number of workspaces with a registered lock.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no workspace has a registered lock.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
