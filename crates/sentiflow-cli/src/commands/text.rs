//! Clean and score commands - one-shot statement analysis

use super::format_score;
use anyhow::Result;
use console::{style, Term};
use sentiflow_core::{Config, Pipeline, TokenKind};

pub fn clean(config: &Config, text: &str, tokens: bool) -> Result<()> {
    let term = Term::stdout();
    let pipeline = Pipeline::new(config)?;

    let cleaned = pipeline.clean(text);
    term.write_line(&cleaned)?;

    if tokens {
        term.write_line("")?;
        for token in pipeline.normalizer().tokenize(&cleaned) {
            let kind = match token.kind {
                TokenKind::Word => style("word").green(),
                TokenKind::Symbol => style("symbol").dim(),
            };
            term.write_line(&format!("  {:>4}  {:<7} {}", token.start, kind, token.text))?;
        }
    }

    Ok(())
}

pub fn score(config: &Config, text: &str, json: bool) -> Result<()> {
    let term = Term::stdout();
    let pipeline = Pipeline::new(config)?;

    let cleaned = pipeline.clean(text);
    let score = pipeline.score_statement(&cleaned);

    if json {
        term.write_line(&serde_json::to_string_pretty(&score)?)?;
        return Ok(());
    }

    term.write_line(&format!("Cleaned:    {}", style(&cleaned).dim()))?;
    term.write_line(&format!("Sentiment:  {}", format_score(&score)))?;
    if !score.raw_scores.is_empty() {
        let parts: Vec<String> = score
            .raw_scores
            .iter()
            .map(|(name, value)| format!("{}={:.3}", name, value))
            .collect();
        term.write_line(&format!("Scores:     {}", parts.join(" ")))?;
    }
    term.write_line(&format!("Scorer:     {}", pipeline.scorer().name()))?;

    Ok(())
}
