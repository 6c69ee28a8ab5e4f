//! Startup configuration: command-line flags layered over an optional
//! TOML file. Flags win.

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// rosterd - read-only student roster daemon speaking JSON lines on stdio
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Seed dataset (JSON). Defaults to the built-in dataset.
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Relative paths resolve against the config file's directory.
    pub seed_path: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl FileConfig {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut cfg = Self::parse(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        if let (Some(seed), Some(dir)) = (cfg.seed_path.as_ref(), path.parent()) {
            if seed.is_relative() {
                cfg.seed_path = Some(dir.join(seed));
            }
        }
        Ok(cfg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub seed_path: Option<PathBuf>,
    pub log_filter: String,
}

pub fn resolve(args: &Args) -> anyhow::Result<Settings> {
    let file = match &args.config {
        Some(p) => FileConfig::load(p)?,
        None => FileConfig::default(),
    };
    Ok(merge(args, file))
}

fn merge(args: &Args, file: FileConfig) -> Settings {
    let log_filter = if args.verbose {
        "debug".to_string()
    } else {
        file.log_filter.unwrap_or_else(|| "info".to_string())
    };
    Settings {
        seed_path: args.seed.clone().or(file.seed_path),
        log_filter,
    }
}
