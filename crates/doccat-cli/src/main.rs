//! doccat - Concatenate PDF or Markdown files into a single document.
//!
//! `merge` and `merge-md` run a single merge and exit; `serve` starts the
//! HTTP API.

mod cli;

use clap::Parser;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, MergeMdArgs, MergePdfArgs, ServeArgs, SourceArgs};
use doccat::config::{MergeConfig, Source, absolutize};
use doccat::kind::KindSelection;
use doccat::merge::try_merge;
use doccat::output::{OutputFormatter, display_merge_report};
use doccat::utils::collect_paths_for_patterns;
use doccat_server::{CorsConfig, ServerConfig, start_server};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(&cli.command);

    let succeeded = match cli.command {
        Commands::Merge(args) => run_merge(pdf_config(&args)),
        Commands::MergeMd(args) => run_merge(markdown_config(&args)),
        Commands::Serve(args) => run_server(server_config(&args)).await,
    };

    if !succeeded {
        process::exit(1);
    }
}

/// Install the diagnostics subscriber. `RUST_LOG` overrides the default.
fn init_tracing(command: &Commands) {
    let default = match command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn pdf_config(args: &MergePdfArgs) -> doccat::Result<MergeConfig> {
    merge_config(&args.source, &args.output, KindSelection::Pdf)
}

fn markdown_config(args: &MergeMdArgs) -> doccat::Result<MergeConfig> {
    Ok(merge_config(&args.source, &args.output, KindSelection::Markdown)?
        .with_titles(args.add_titles))
}

/// Translate the shared merge arguments into a config.
///
/// `--files` takes precedence over `--input`; a file list whose patterns
/// match nothing stays an (empty) file list rather than falling back to the
/// directory.
fn merge_config(
    source: &SourceArgs,
    output: &Path,
    kind: KindSelection,
) -> doccat::Result<MergeConfig> {
    let source_set = if source.files.is_empty() {
        Source::Directory(source.input.clone())
    } else {
        Source::Files(collect_paths_for_patterns(&source.files)?)
    };

    let mut config = MergeConfig::new(source_set, absolutize(output), kind);
    config.verbose = source.verbose;
    config.quiet = source.quiet;

    Ok(config)
}

fn server_config(args: &ServeArgs) -> ServerConfig {
    let mut config = ServerConfig::default().with_address(&args.host, args.port);
    if !args.cors_origins.is_empty() {
        config.cors = CorsConfig::AllowOrigins(args.cors_origins.clone());
    }
    if let Some(root) = &args.workspace_root {
        config = config.with_workspace_root(root);
    }
    config
}

/// Run one merge and report it. Returns whether it succeeded.
fn run_merge(config: doccat::Result<MergeConfig>) -> bool {
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            OutputFormatter::default().error(&err.to_string());
            return false;
        }
    };

    tracing::debug!("Merging with {config:?}");
    let formatter = OutputFormatter::from_config(&config);

    match try_merge(&config) {
        Ok(report) => {
            display_merge_report(&formatter, &report);
            true
        }
        Err(err) => {
            formatter.error(&err.to_string());
            false
        }
    }
}

async fn run_server(config: ServerConfig) -> bool {
    match start_server(config).await {
        Ok(()) => true,
        Err(err) => {
            OutputFormatter::default().error(&format!("{err:#}"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn source(files: &[&str]) -> SourceArgs {
        SourceArgs {
            input: PathBuf::from("docs"),
            files: files.iter().map(|f| f.to_string()).collect(),
            verbose: false,
            quiet: true,
        }
    }

    #[test]
    fn test_directory_source_by_default() {
        let config = merge_config(&source(&[]), Path::new("out.pdf"), KindSelection::Pdf).unwrap();

        assert_eq!(config.source, Source::Directory(PathBuf::from("docs")));
        assert!(config.output.is_absolute());
        assert!(config.output.ends_with("out.pdf"));
        assert!(config.quiet);
    }

    #[test]
    fn test_files_override_input() {
        let config =
            merge_config(&source(&["z.md", "a.md"]), Path::new("o.md"), KindSelection::Markdown)
                .unwrap();

        assert_eq!(
            config.source,
            Source::Files(vec![PathBuf::from("z.md"), PathBuf::from("a.md")])
        );
    }

    #[test]
    fn test_unmatched_pattern_keeps_file_list() {
        let temp = TempDir::new().unwrap();
        let pattern = format!("{}/*.md", temp.path().display());

        let config =
            merge_config(&source(&[&pattern]), Path::new("o.md"), KindSelection::Markdown)
                .unwrap();

        assert_eq!(config.source, Source::Files(Vec::new()));
    }

    #[test]
    fn test_markdown_config_carries_titles() {
        let args = MergeMdArgs {
            source: source(&[]),
            output: PathBuf::from("merged.md"),
            add_titles: false,
        };
        let config = markdown_config(&args).unwrap();

        assert!(!config.options.add_titles);
        assert_eq!(config.kind, KindSelection::Markdown);
    }

    #[test]
    fn test_run_merge_reports_failure() {
        let temp = TempDir::new().unwrap();
        let config = MergeConfig::new(
            Source::Directory(temp.path().to_path_buf()),
            temp.path().join("merged.pdf"),
            KindSelection::Pdf,
        );

        assert!(!run_merge(Ok(config)));
        assert!(!temp.path().join("merged.pdf").exists());
    }

    #[test]
    fn test_run_merge_markdown() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.md"), "A").unwrap();
        let output = temp.path().join("out").join("merged.md");
        std::fs::create_dir(output.parent().unwrap()).unwrap();

        let mut config = MergeConfig::new(
            Source::Directory(temp.path().to_path_buf()),
            &output,
            KindSelection::Markdown,
        )
        .with_titles(true);
        config.quiet = true;

        assert!(run_merge(Ok(config)));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "# a\n\nA");
    }

    #[test]
    fn test_server_config() {
        let args = ServeArgs {
            port: 9090,
            host: "127.0.0.1".into(),
            cors_origins: vec!["http://localhost:3000".into()],
            workspace_root: Some(PathBuf::from("/srv/doccat")),
        };
        let config = server_config(&args);

        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "127.0.0.1");
        assert!(matches!(config.cors, CorsConfig::AllowOrigins(ref o) if o.len() == 1));
        assert_eq!(config.workspace_root, Some(PathBuf::from("/srv/doccat")));
    }
}
