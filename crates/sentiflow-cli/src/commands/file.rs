//! File command - analyse a transcript as one conversation

use super::{format_score, print_report};
use anyhow::{Context, Result};
use console::{style, Term};
use sentiflow_core::{Config, ConversationAnalyzer, Pipeline};
use std::path::Path;

pub fn run(config: &Config, path: &str, json: bool) -> Result<()> {
    let term = Term::stdout();
    let file_path = Path::new(path);

    if !file_path.exists() {
        anyhow::bail!("File not found: {}", path);
    }

    let contents = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read transcript: {}", path))?;

    let mut pipeline = Pipeline::new(config)?;
    let conversation_id = file_path.display().to_string();

    if !json {
        term.write_line(&format!(
            "{} Analysing transcript: {}",
            style("📁").cyan(),
            path
        ))?;
        term.write_line("")?;
    }

    let mut total_us = 0;
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let turn = pipeline.process_turn(&conversation_id, line);
        total_us += turn.timings.total_us;

        if json {
            continue;
        }
        if turn.recorded {
            term.write_line(&format!(
                "{:>4}  {}  {}",
                index + 1,
                format_score(&turn.sentiment),
                style(&turn.cleaned).dim()
            ))?;
        } else {
            term.write_line(&format!(
                "{:>4}  {}",
                index + 1,
                style("(empty after cleaning)").dim()
            ))?;
        }
    }

    let report = pipeline.end_conversation(&conversation_id);

    if json {
        term.write_line(&serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    term.write_line("")?;
    print_report(&term, &report)?;
    term.write_line("")?;
    term.write_line(&format!("{} Total: {}us", style("⏱").dim(), total_us))?;

    Ok(())
}
