//! Chat command - interactive conversation with live sentiment

use super::{format_score, print_report};
use crate::journal::{ConversationRecord, Journal};
use crate::reply::ReplyGenerator;
use anyhow::{Context, Result};
use console::{style, Term};
use sentiflow_core::{Config, ConversationAnalyzer, Pipeline};
use std::io::BufRead;

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "bye"];

pub fn run(config: &Config, no_journal: bool, verbose: bool) -> Result<()> {
    let term = Term::stdout();

    let mut pipeline = Pipeline::new(config).context("Failed to initialize pipeline")?;
    let replies = ReplyGenerator::new();
    let journal = if config.journal.enabled && !no_journal {
        Some(Journal::new(config.journal_path()?))
    } else {
        None
    };

    let mut record = ConversationRecord::start();
    let conversation_id = record.id.to_string();

    term.write_line(&format!(
        "{} SentiFlow chat (scorer: {})",
        style("💬").cyan(),
        style(pipeline.scorer().name()).cyan()
    ))?;
    term.write_line(&format!(
        "  Type {} to end the conversation",
        style("quit").cyan()
    ))?;
    term.write_line("")?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut turn_index = 0;

    loop {
        term.write_str(&format!("{} ", style("You:").bold()))?;
        term.flush()?;

        let Some(line) = lines.next() else {
            term.write_line("")?;
            break;
        };
        let line = line.context("Failed to read input")?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if QUIT_WORDS.contains(&input.to_lowercase().as_str()) {
            break;
        }

        let turn = pipeline.process_turn(&conversation_id, input);
        if !turn.recorded {
            term.write_line(&format!(
                "{} Nothing left to analyse after cleaning",
                style("ℹ").blue()
            ))?;
            continue;
        }

        let reply = replies.reply(&turn.cleaned, turn.sentiment.label, turn_index);
        turn_index += 1;

        term.write_line(&format!("  {} {}", style("sentiment:").dim(), format_score(&turn.sentiment)))?;
        if verbose {
            term.write_line(&format!(
                "  {} cleaned: {:?} | normalize: {}us | score: {}us",
                style("⏱").dim(),
                turn.cleaned,
                turn.timings.normalize_us,
                turn.timings.score_us
            ))?;
        }
        term.write_line(&format!("{} {}", style("Bot:").cyan().bold(), reply))?;
        term.write_line("")?;

        record.push_user(&turn.raw, &turn.cleaned, turn.sentiment);
        record.push_bot(reply);
    }

    let report = pipeline.end_conversation(&conversation_id);
    record.finish(&report);

    term.write_line("")?;
    print_report(&term, &report)?;

    if let Some(journal) = journal {
        if report.turn_count > 0 {
            journal.append(&record)?;
            term.write_line(&format!(
                "{} Saved to {:?}",
                style("✓").green(),
                journal.path()
            ))?;
        }
    }

    Ok(())
}
