//! Extract command - one-shot entity and relation extraction.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use console::{Style, style};

use super::Context;

/// Arguments for the extract command.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Text to analyze (reads stdin when neither TEXT nor --file is given)
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Run the extract command.
pub fn run(args: ExtractArgs, ctx: &Context) -> Result<()> {
    let text = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let services = ctx.services()?;
    let extractor = services.knowledge().extractor();
    let dim = Style::new().dim();

    if ctx.verbose && !ctx.json_output {
        eprintln!(
            "{}",
            dim.apply_to(format!(
                "Tagger: {} ({} chars of input)",
                extractor.tagger_name(),
                text.chars().count()
            ))
        );
    }

    let extraction = extractor.extract(&text);

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
        return Ok(());
    }

    println!("{}", style("Entities").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    if extraction.entities.is_empty() {
        println!("{}", dim.apply_to("  (none)"));
    }
    for entity in &extraction.entities {
        println!("  {}", style(entity).cyan());
    }
    println!();

    println!("{}", style("Relations").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    if extraction.relations.is_empty() {
        println!("{}", dim.apply_to("  (none)"));
    }
    for triple in &extraction.relations {
        println!(
            "  {} -[{}]-> {}",
            style(&triple.subject).cyan(),
            style(triple.predicate.as_str()).yellow(),
            style(&triple.object).cyan()
        );
        println!("    {}", dim.apply_to(&triple.source));
    }

    Ok(())
}
