//! page-resolver CLI
//!
//! Loads a page manifest (the keys a build-time glob would produce) and
//! resolves page names against it.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 PAGE RESOLVER                 │
//!   pages.toml ──────┼─▶ config ──▶ PageResolver ──▶ resolve        │
//!                    │                   ▲          └─▶ inspect      │
//!                    │                   │ reload_pages              │
//!   page files ──────┼─▶ reload watcher ─┴─ debounce   (watch)       │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};

use page_resolver::config::{load_config, ResolverConfig};
use page_resolver::observability::logging::init_logging;
use page_resolver::reload::{debounce, PageFileFilter, PageWatcher};
use page_resolver::{PageLoader, PageMapping, PageResolver, ResolveError};

#[derive(Parser)]
#[command(name = "page-resolver")]
#[command(about = "Resolve page names against a page manifest", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "pages.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve page names, alternatives tried in order
    Resolve {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print detected domains, extensions and pages as JSON
    Inspect,
    /// Watch page files and reload the manifest when pages come or go
    Watch,
}

/// Mapping whose pages load as their own path.
fn manifest_mapping(pages: &[String]) -> PageMapping<String> {
    pages
        .iter()
        .map(|key| (key.clone(), PageLoader::ready(key.clone())))
        .collect()
}

fn build_resolver(config: &ResolverConfig) -> Result<PageResolver<String>, ResolveError> {
    let mut resolver = PageResolver::new();
    resolver.configure(manifest_mapping(&config.pages), config.resolver.clone())?;
    Ok(resolver)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    init_logging(&config.observability.log_level);

    tracing::info!(
        config = %cli.config.display(),
        pages = config.pages.len(),
        "Configuration loaded"
    );

    let resolver = build_resolver(&config)?;

    match cli.command {
        Commands::Resolve { names } => {
            let page = resolver.resolve(names).await?;
            println!("{page}");
        }
        Commands::Inspect => {
            println!("{}", serde_json::to_string_pretty(&resolver.summary())?);
        }
        Commands::Watch => watch(&cli.config, &config, resolver).await?,
    }

    Ok(())
}

async fn watch(
    config_path: &Path,
    config: &ResolverConfig,
    mut resolver: PageResolver<String>,
) -> Result<(), Box<dyn Error>> {
    let filter = PageFileFilter::from_config(&config.watch);
    let (watcher, changes) = PageWatcher::new(Path::new(&config.watch.root), filter);
    let _watcher = watcher.run()?;
    let mut batches = debounce(changes, Duration::from_millis(config.watch.debounce_ms));

    loop {
        tokio::select! {
            batch = batches.recv() => {
                let Some(batch) = batch else { break };
                tracing::info!(
                    changes = batch.len(),
                    event = "page-cache-invalidated",
                    "Page files changed"
                );

                match load_config(config_path) {
                    Ok(fresh) => {
                        resolver.reload_pages(manifest_mapping(&fresh.pages));
                        tracing::info!(
                            pages = fresh.pages.len(),
                            domain_mode = resolver.is_domain_mode(),
                            "Page manifest reloaded"
                        );
                    }
                    Err(e) => {
                        tracing::error!("Failed to reload page manifest: {}. Keeping current pages.", e);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}
