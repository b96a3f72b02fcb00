//! Config command - configuration inspection.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::{Style, style};
use serde_json::json;

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved configuration and where it came from
    Show,

    /// Show configuration file paths
    Path,
}

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::Path => cmd_path(ctx),
    }
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let loaded = &ctx.loaded;
    let config = &loaded.config;

    if ctx.json_output {
        let value = json!({
            "sources": loaded.loaded_from(),
            "warnings": loaded.warnings,
            "extraction": config.extraction_limits(),
            "session": config.session(),
            "tagger": config.tagger(),
            "logging": config.logging(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    println!("# kgraph Configuration\n");

    let sources = loaded.loaded_from();
    if sources.is_empty() {
        println!("No config files loaded (using defaults)\n");
    } else {
        println!("Config files:");
        for source in &sources {
            println!("  {}", source.display());
        }
        println!();
    }
    for warning in &loaded.warnings {
        println!("{} {}", Style::new().yellow().apply_to("Warning:"), warning);
    }

    let limits = config.extraction_limits();
    println!("{}", style("Extraction").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    println!("  max_candidates:     {}", limits.max_candidates);
    println!("  max_entities:       {}", limits.max_entities);
    println!("  max_relations:      {}", limits.max_relations);
    println!("  fallback_threshold: {}", limits.fallback_threshold);
    println!("  max_fallback_nouns: {}", limits.max_fallback_nouns);
    println!("  min_entity_chars:   {}", limits.min_entity_chars);
    println!("  max_source_chars:   {}", limits.max_source_chars);
    println!();

    let session = config.session();
    println!("{}", style("Session").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    println!("  max_sessions:       {}", session.max_sessions);
    match session.ttl() {
        Some(ttl) => println!("  ttl:                {}s", ttl.as_secs()),
        None => println!("  ttl:                {}", dim.apply_to("(none)")),
    }
    println!();

    let tagger = config.tagger();
    println!("{}", style("Tagger").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    println!("  backend:            {}", style(tagger.backend).cyan());
    if tagger.lexicon.is_empty() {
        println!("  lexicon:            {}", dim.apply_to("(built-in only)"));
    }
    for path in &tagger.lexicon {
        println!("  lexicon:            {}", path.display());
    }
    println!();

    Ok(())
}

fn cmd_path(ctx: &Context) -> Result<()> {
    let user = ctx
        .config_dir
        .clone()
        .or_else(kgraph_config::xdg_config_dir)
        .map(|d| d.join("config.toml"));
    let project = std::env::current_dir()?.join("kgraph.toml");

    if ctx.json_output {
        let value = json!({ "user": user, "project": project });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match user {
        Some(path) => println!("user:    {}", path.display()),
        None => println!("user:    {}", Style::new().dim().apply_to("(no config directory)")),
    }
    println!("project: {}", project.display());
    Ok(())
}
