//! Build command - replay a transcript into one session graph.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::Args;
use console::{Style, style};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use kgraph_domain::{DomainError, ExportFormat, GraphStats};

use super::Context;

/// Arguments for the build command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// JSON-lines transcript of {"question", "answer"} objects
    #[arg(short, long, value_name = "PATH")]
    pub transcript: PathBuf,

    /// Session ID to build into (default: a fresh UUID)
    #[arg(short, long)]
    pub session: Option<String>,

    /// Export format: json or csv
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write the export here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// One transcript line.
#[derive(Debug, Deserialize)]
struct TranscriptTurn {
    question: String,
    answer: String,
}

#[derive(Debug, Serialize)]
struct BuildSummary {
    session_id: String,
    turns: usize,
    skipped: usize,
    new_triples: usize,
    stats: GraphStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
}

/// Run the build command.
pub fn run(args: BuildArgs, ctx: &Context) -> Result<()> {
    let format = match args.format.as_deref() {
        Some(name) => Some(name.parse::<ExportFormat>()?),
        None if args.output.is_some() => Some(format_from_extension(args.output.as_deref())),
        None => None,
    };

    let contents = std::fs::read_to_string(&args.transcript)
        .with_context(|| format!("failed to read {}", args.transcript.display()))?;

    let services = ctx.services()?;
    let knowledge = services.knowledge();
    let session_id = match args.session {
        Some(id) => id,
        None => knowledge.new_session(),
    };

    let mut turns = 0;
    let mut skipped = 0;
    let mut new_triples = 0;
    let mut stats = None;

    for (idx, line) in contents.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let turn: TranscriptTurn = match serde_json::from_str(line) {
            Ok(turn) => turn,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping malformed transcript line");
                skipped += 1;
                continue;
            }
        };

        match knowledge.process(Some(&session_id), &turn.question, &turn.answer) {
            Ok(outcome) => {
                turns += 1;
                new_triples += outcome.new_triples.len();
                stats = Some(outcome.stats);
            }
            Err(DomainError::InvalidInput(e)) => {
                warn!(line = line_no, error = %e, "Skipping invalid transcript turn");
                skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let Some(stats) = stats else {
        bail!(
            "no usable turns in {} ({} skipped)",
            args.transcript.display(),
            skipped
        );
    };
    info!(session_id = %session_id, turns, skipped, "Transcript replayed");

    if let Some(format) = format {
        let rendered = knowledge.export(&session_id, format)?.render()?;
        match &args.output {
            Some(path) => std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => {
                println!("{rendered}");
                return Ok(());
            }
        }
    }

    let summary = BuildSummary {
        session_id,
        turns,
        skipped,
        new_triples,
        stats,
        output: args.output,
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

/// `.csv` means CSV; anything else gets JSON.
fn format_from_extension(path: Option<&Path>) -> ExportFormat {
    match path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
        _ => ExportFormat::Json,
    }
}

fn print_summary(summary: &BuildSummary) {
    let dim = Style::new().dim();

    println!("{}", style("Session Graph").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    println!();
    println!("  Session:     {}", style(&summary.session_id).cyan());
    println!("  Turns:       {}", style(summary.turns).cyan());
    if summary.skipped > 0 {
        println!("  Skipped:     {}", style(summary.skipped).yellow());
    }
    println!("  Entities:    {}", style(summary.stats.total_entities).cyan());
    println!("  Triples:     {}", style(summary.stats.total_triples).cyan());
    println!("  History:     {}", style(summary.stats.total_history).cyan());
    if let Some(path) = &summary.output {
        println!();
        println!("{}", dim.apply_to(format!("Exported to {}", path.display())));
    }
}
