//! Config command - manage configuration

use anyhow::Result;
use console::{style, Term};
use sentiflow_core::config::ScorerBackend;
use sentiflow_core::Config;
use std::path::PathBuf;

fn resolve_path(config_path: Option<&str>) -> Result<PathBuf> {
    match config_path {
        Some(p) => Ok(PathBuf::from(p)),
        None => Config::default_config_path(),
    }
}

fn optional_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!("{:?}", p))
        .unwrap_or_else(|| "(built-in)".to_string())
}

pub fn show(config: &Config) -> Result<()> {
    let term = Term::stdout();

    term.write_line(&format!("{}", style("SentiFlow Configuration").bold()))?;
    term.write_line("")?;

    term.write_line(&format!("{}", style("Normalizer:").dim()))?;
    term.write_line(&format!(
        "  Elongation cap:   {}",
        style(config.normalizer.max_elongation).cyan()
    ))?;
    term.write_line(&format!(
        "  Negation window:  {}",
        style(config.normalizer.negation_window).cyan()
    ))?;
    term.write_line(&format!(
        "  Contractions:     {}",
        optional_path(&config.normalizer.contractions_file)
    ))?;
    term.write_line(&format!(
        "  Slang:            {}",
        optional_path(&config.normalizer.slang_file)
    ))?;
    term.write_line(&format!(
        "  Emoji:            {}",
        optional_path(&config.normalizer.emoji_file)
    ))?;

    term.write_line("")?;
    term.write_line(&format!("{}", style("Scorer:").dim()))?;
    term.write_line(&format!(
        "  Backend:          {}",
        style(config.scorer.backend.display_name()).cyan()
    ))?;
    term.write_line(&format!(
        "  Lexicon:          {}",
        optional_path(&config.scorer.lexicon_file)
    ))?;
    if config.scorer.backend == ScorerBackend::NaiveBayes {
        let model_path = config.model_path()?;
        let status = if model_path.exists() {
            style("trained").green()
        } else {
            style("not trained").red()
        };
        term.write_line(&format!("  Model:            {:?} ({})", model_path, status))?;
    }

    term.write_line("")?;
    term.write_line(&format!("{}", style("Journal:").dim()))?;
    term.write_line(&format!(
        "  Enabled:          {}",
        style(config.journal.enabled).cyan()
    ))?;
    term.write_line(&format!("  Path:             {:?}", config.journal_path()?))?;

    Ok(())
}

pub fn show_path(config_path: Option<&str>) -> Result<()> {
    let term = Term::stdout();
    let path = resolve_path(config_path)?;

    term.write_line(&format!("Config file: {:?}", path))?;

    if path.exists() {
        term.write_line(&format!("{} File exists", style("✓").green()))?;
    } else {
        term.write_line(&format!(
            "{} File does not exist (using defaults)",
            style("ℹ").blue()
        ))?;
    }

    Ok(())
}

pub fn init(config: &Config, config_path: Option<&str>) -> Result<()> {
    let term = Term::stdout();
    let path = resolve_path(config_path)?;

    if path.exists() {
        term.write_line(&format!(
            "{} {:?} already exists, leaving it alone",
            style("ℹ").blue(),
            path
        ))?;
        return Ok(());
    }

    config.save(config_path)?;
    term.write_line(&format!("{} Wrote {:?}", style("✓").green(), path))?;
    Ok(())
}

pub fn set_backend(config: &mut Config, config_path: Option<&str>, name: &str) -> Result<()> {
    let term = Term::stdout();

    let Some(backend) = ScorerBackend::from_name(name) else {
        term.write_line(&format!(
            "{} Unknown backend '{}'. Available: lexicon, naive-bayes",
            style("✗").red(),
            name
        ))?;
        return Ok(());
    };

    config.scorer.backend = backend.clone();
    config.save(config_path)?;

    term.write_line(&format!(
        "{} Scorer set to: {}",
        style("✓").green(),
        backend.display_name()
    ))?;

    if backend == ScorerBackend::NaiveBayes && !config.model_path()?.exists() {
        term.write_line(&format!(
            "{} No model trained yet, the lexicon will be used. Run: sentiflow train <data.tsv>",
            style("⚠").yellow()
        ))?;
    }

    Ok(())
}

pub fn set_elongation(config: &mut Config, config_path: Option<&str>, cap: usize) -> Result<()> {
    let term = Term::stdout();

    if cap == 0 {
        term.write_line(&format!(
            "{} Elongation cap must be at least 1",
            style("✗").red()
        ))?;
        return Ok(());
    }

    config.normalizer.max_elongation = cap;
    config.save(config_path)?;

    term.write_line(&format!(
        "{} Elongation cap set to: {}",
        style("✓").green(),
        cap
    ))?;
    Ok(())
}

pub fn set_negation_window(
    config: &mut Config,
    config_path: Option<&str>,
    window: usize,
) -> Result<()> {
    let term = Term::stdout();

    if window == 0 {
        term.write_line(&format!(
            "{} Negation window must be at least 1",
            style("✗").red()
        ))?;
        return Ok(());
    }

    config.normalizer.negation_window = window;
    config.save(config_path)?;

    term.write_line(&format!(
        "{} Negation window set to: {} words",
        style("✓").green(),
        window
    ))?;
    Ok(())
}
