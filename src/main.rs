mod cli;
mod config;
mod diagnostics;
mod emphasis;
mod explain;
mod graph;
mod location;
mod output;
mod report;
mod trace;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::DiagnosticsConfig;
use diagnostics::DiagnosticContext;
use graph::shortener::RequestShortener;
use location::FsSourceMapper;
use location::fs_mapper::DEFAULT_CONTEXT_LINES;
use trace::LoaderFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Explain {
            report,
            root,
            format,
            color,
            verbose,
        } => {
            init_logging(verbose);

            let loaded = report::load_report(&report)?;
            let root = match root.or_else(|| loaded.root.clone()) {
                Some(root) => root,
                None => std::env::current_dir()?,
            };
            let config = DiagnosticsConfig::load(&root);

            let emphasis = color.or(config.color).unwrap_or_default().emphasis();
            let shortener = RequestShortener::new(&root);
            let filter = LoaderFilter::new(config.hidden_loaders.as_deref().unwrap_or_default())?;
            let mapper =
                FsSourceMapper::new(config.context_lines.unwrap_or(DEFAULT_CONTEXT_LINES));

            let ctx = DiagnosticContext {
                graph: &loaded.graph,
                shortener: &shortener,
                filter: &filter,
                mapper: &mapper,
                emphasis: emphasis.as_ref(),
                root: &root,
            };
            tracing::debug!(
                modules = loaded.graph.module_count(),
                errors = loaded.errors.len(),
                "explaining build report {}",
                report.display()
            );

            let results = explain::explain_errors(&ctx, &loaded.errors).await;
            output::print_results(&results, &format)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(level))
        .init();
}
