//! Server configuration and startup.

use anyhow::{Context, Result};
use doccat::TempWorkspace;
use std::path::PathBuf;
use tokio::net::TcpListener;

use crate::routes::create_router;
use crate::state::ServerContext;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default upload size limit (100 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 100 << 20;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Directory workspaces are created in; the OS temp directory when unset.
    pub workspace_root: Option<PathBuf>,
    /// Largest accepted upload body in bytes.
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors: CorsConfig::default(),
            workspace_root: None,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }
}

impl ServerConfig {
    /// Set the bind address and port.
    #[must_use]
    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Set the workspace root.
    #[must_use]
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Workspace manager for this configuration.
    pub fn workspace(&self) -> TempWorkspace {
        match &self.workspace_root {
            Some(root) => TempWorkspace::with_root(root),
            None => TempWorkspace::new(),
        }
    }
}

/// Endpoints printed at startup.
const ENDPOINTS: &[(&str, &str)] = &[
    ("POST   /api/merge", "Merge PDF files in a directory"),
    ("POST   /api/merge-md", "Merge Markdown files in a directory"),
    ("GET    /api/files?dir=...", "List PDF files in a directory"),
    ("GET    /api/md-files?dir=...", "List Markdown files in a directory"),
    ("GET    /api/download/{path}", "Download a merged file"),
    ("POST   /api/temp-dir", "Create a temporary directory"),
    ("POST   /api/upload", "Upload a file to a temporary directory"),
    ("GET    /api/temp-files?dir=...", "List files in a temporary directory"),
    ("POST   /api/merge-files", "Merge files in a temporary directory"),
    ("DELETE /api/temp-dir", "Delete a temporary directory"),
];

/// Start the HTTP server and serve until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = ServerContext::new(config.workspace());
    let app = create_router(ctx, &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("doccat API server listening on http://{addr}");
    for (route, description) in ENDPOINTS {
        tracing::info!("  {route:<30} {description}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}
