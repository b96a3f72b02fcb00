//! kgraph - knowledge graphs from question/answer sessions
//!
//! Main entry point for the kgraph CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kgraph_config::TaggerBackend;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

mod commands;

use commands::{build, config, extract};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// kgraph - build knowledge graphs from question/answer sessions
#[derive(Parser)]
#[command(name = "kgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Extra user lexicon to load (repeatable)
    #[arg(long, global = true, value_name = "PATH")]
    pub lexicon: Vec<PathBuf>,

    /// Tagger backend: auto, lexicon or jieba (overrides config)
    #[arg(long, global = true, value_name = "BACKEND")]
    pub tagger: Option<TaggerBackend>,

    /// User config directory (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH", env = "KGRAPH_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract entities and relations from text
    Extract(extract::ExtractArgs),

    /// Replay a transcript into a session graph and export it
    Build(build::BuildArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loaded = kgraph_config::load_config_with_options(None, cli.config_dir.as_deref())?;
    if !cli.lexicon.is_empty() || cli.tagger.is_some() {
        let mut tagger = loaded.config.tagger();
        tagger.lexicon.extend(cli.lexicon.iter().cloned());
        if let Some(backend) = cli.tagger {
            tagger.backend = backend;
        }
        loaded.config.tagger = Some(tagger);
    }

    let log_dir = loaded
        .config
        .logging()
        .dir
        .or_else(|| {
            cli.config_dir
                .clone()
                .or_else(kgraph_config::xdg_config_dir)
                .map(|d| d.join("logs"))
        })
        .unwrap_or_else(|| PathBuf::from("logs"));
    let _guard = init_tracing(cli.verbose, &log_dir);

    for warning in &loaded.warnings {
        warn!("{warning}");
    }

    let ctx = commands::Context {
        json_output: cli.json,
        verbose: cli.verbose,
        config_dir: cli.config_dir,
        loaded,
    };

    match cli.command {
        Commands::Extract(args) => extract::run(args, &ctx),
        Commands::Build(args) => build::run(args, &ctx),
        Commands::Config(args) => config::run(args, &ctx),
    }
}

/// Console (human-readable, stderr) plus a daily-rolling JSON file.
///
/// If the log directory can't be used the file layer is skipped.
fn init_tracing(verbose: bool, log_dir: &std::path::Path) -> Option<WorkerGuard> {
    use tracing_subscriber::prelude::*;

    let filter = if verbose {
        "kgraph=debug,kgraph_domain=debug,kgraph_session=debug,kgraph_extract=debug,kgraph_config=debug,info"
    } else {
        "kgraph=warn,kgraph_domain=warn,kgraph_session=warn,kgraph_extract=warn,warn"
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("kgraph.log")
        .build(log_dir)
        .ok();
    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "kgraph=trace,kgraph_domain=trace,kgraph_session=trace,kgraph_extract=trace,kgraph_config=trace,info",
                ));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(file_layer)
        .init();

    guard
}
