//! History command - list journalled conversations

use super::styled_label;
use crate::journal::Journal;
use anyhow::Result;
use console::{style, Term};
use sentiflow_core::Config;

pub fn run(config: &Config, limit: usize) -> Result<()> {
    let term = Term::stdout();
    let journal = Journal::new(config.journal_path()?);
    let records = journal.load_all()?;

    if records.is_empty() {
        term.write_line(&format!(
            "{} No conversations in {:?}",
            style("ℹ").blue(),
            journal.path()
        ))?;
        return Ok(());
    }

    term.write_line(&format!(
        "{} ({} of {})",
        style("Conversation history").bold(),
        limit.min(records.len()),
        records.len()
    ))?;
    term.write_line("")?;

    let skip = records.len().saturating_sub(limit);
    for record in records.iter().skip(skip) {
        let id = record.id.to_string();
        let overall = match record.overall {
            Some(overall) => format!("{} ({:.2})", styled_label(overall.label), overall.confidence),
            None => style("unfinished").dim().to_string(),
        };
        let mood = record
            .mood
            .map(|m| {
                let shift = if m.significantly_shifted { ", shifted" } else { "" };
                format!("{}{}", m.trend, shift)
            })
            .unwrap_or_default();

        term.write_line(&format!(
            "{}  {}  {:>3} msgs  {}  {}",
            style(&id[..8]).cyan(),
            record.started_at.format("%Y-%m-%d %H:%M"),
            record.user_message_count(),
            overall,
            style(mood).dim()
        ))?;
    }

    Ok(())
}
