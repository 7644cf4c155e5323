//! Train command - fit a naive Bayes model from labelled statements

use anyhow::{Context, Result};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use sentiflow_core::config::ScorerBackend;
use sentiflow_core::sentiment::NaiveBayesBackend;
use sentiflow_core::{Config, TextNormalizer};
use std::path::PathBuf;

/// Parse one `label<TAB>text` line; blank lines and `#` comments yield None
fn parse_line(line: &str) -> Option<Result<(&str, &str), String>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return None;
    }
    match line.split_once('\t') {
        Some((label, text)) if !label.trim().is_empty() && !text.trim().is_empty() => {
            Some(Ok((label.trim(), text)))
        }
        _ => Some(Err(format!("expected `label<TAB>text`, got {:?}", line))),
    }
}

pub fn run(config: &Config, path: &str, output: Option<&str>, alpha: f64) -> Result<()> {
    let term = Term::stdout();

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read training data: {}", path))?;
    let normalizer = TextNormalizer::from_options(&config.normalizer)?;

    let lines: Vec<&str> = contents.lines().collect();
    let pb = ProgressBar::new(lines.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} statements")?
            .progress_chars("#>-"),
    );

    let mut examples: Vec<(String, String)> = Vec::new();
    let mut skipped = 0;
    for (index, line) in lines.iter().enumerate() {
        pb.inc(1);
        match parse_line(line) {
            None => {}
            Some(Ok((label, text))) => {
                let cleaned = normalizer.clean(text);
                if cleaned.is_empty() {
                    skipped += 1;
                    continue;
                }
                examples.push((label.to_lowercase(), cleaned));
            }
            Some(Err(message)) => {
                tracing::warn!("Line {}: {}", index + 1, message);
                skipped += 1;
            }
        }
    }
    pb.finish_and_clear();

    let model = NaiveBayesBackend::fit(&examples, alpha)
        .with_context(|| format!("Failed to train on {}", path))?;

    let model_path = match output {
        Some(p) => PathBuf::from(p),
        None => config.model_path()?,
    };
    model.save(&model_path)?;

    term.write_line(&format!(
        "{} Trained on {} statements ({} skipped)",
        style("✓").green(),
        examples.len(),
        skipped
    ))?;
    term.write_line(&format!(
        "  Classes:    {}",
        model.classes().collect::<Vec<_>>().join(", ")
    ))?;
    term.write_line(&format!("  Vocabulary: {} words", model.vocabulary_size()))?;
    term.write_line(&format!("  Saved to:   {:?}", model_path))?;

    if config.scorer.backend != ScorerBackend::NaiveBayes {
        term.write_line(&format!(
            "{} Scoring still uses the lexicon. Run: sentiflow config set-backend naive-bayes",
            style("ℹ").blue()
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("positive\tI love it"), Some(Ok(("positive", "I love it"))));
        assert_eq!(parse_line(" negative \tawful\r"), Some(Ok(("negative", "awful"))));
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("# comment"), None);
        assert!(matches!(parse_line("no tab here"), Some(Err(_))));
        assert!(matches!(parse_line("positive\t   "), Some(Err(_))));
    }
}
