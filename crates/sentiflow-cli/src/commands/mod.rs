//! CLI command implementations

pub mod chat;
pub mod config;
pub mod file;
pub mod history;
pub mod text;
pub mod train;

use anyhow::Result;
use console::{style, StyledObject, Term};
use sentiflow_core::{ConversationReport, SentimentLabel, SentimentScore, Trend};

/// Colour a sentiment label the same way everywhere
pub(crate) fn styled_label(label: SentimentLabel) -> StyledObject<&'static str> {
    match label {
        SentimentLabel::Positive => style(label.as_str()).green(),
        SentimentLabel::Neutral => style(label.as_str()).yellow(),
        SentimentLabel::Negative => style(label.as_str()).red(),
    }
}

/// One-line statement summary: `positive (0.812)`
pub(crate) fn format_score(score: &SentimentScore) -> String {
    format!("{} ({:.3})", styled_label(score.label), score.confidence)
}

/// Print the end-of-conversation summary
pub(crate) fn print_report(term: &Term, report: &ConversationReport) -> Result<()> {
    term.write_line(&format!("{}", style("Conversation summary").bold()))?;
    term.write_line(&format!("  Statements:       {}", report.turn_count))?;
    term.write_line(&format!(
        "  Overall:          {} ({:.3})",
        styled_label(report.overall.label),
        report.overall.confidence
    ))?;

    let trend = match report.mood.trend {
        Trend::Improving => style(report.mood.trend.as_str()).green(),
        Trend::Worsening => style(report.mood.trend.as_str()).red(),
        Trend::Stable => style(report.mood.trend.as_str()).dim(),
    };
    term.write_line(&format!("  Mood trend:       {}", trend))?;
    term.write_line(&format!(
        "  Significant shift: {}",
        if report.mood.significantly_shifted { "yes" } else { "no" }
    ))?;
    term.write_line(&format!("  Volatility:       {:.3}", report.mood.volatility))?;
    Ok(())
}
