//! Command parsing and execution.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use vectorizer_chunk::{
    create_estimator, detect_indicators, parse_markdown_structure, DocumentChunker,
    TokenEstimator,
};
use vectorizer_core::{ChunkOverrides, ChunkSettings};

/// Environment variable naming the settings file.
pub const ENV_SETTINGS: &str = "VECTORIZER_SETTINGS";
pub const DEFAULT_SETTINGS_FILE: &str = "vectorizer.json";

/// Token-bounded document chunking.
#[derive(Parser, Debug)]
#[command(name = "vectorizer", version, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Chunk a document
    Chunk(ChunkArgs),
    /// Print parsed markdown elements as JSON
    Structure {
        /// File path, or `-` for stdin
        input: String,
        /// Settings JSON (default: vectorizer.json)
        #[arg(long, env = ENV_SETTINGS)]
        settings: Option<PathBuf>,
    },
    /// Report markdown indicators
    Detect {
        /// File path, or `-` for stdin
        input: String,
    },
}

/// Arguments of `vectorizer chunk`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkArgs {
    /// File path, or `-` for stdin
    pub input: String,
    /// token_based, markdown, hybrid, ...
    #[arg(long)]
    pub strategy: Option<String>,
    /// Target tokens per chunk (50-2000)
    #[arg(long)]
    pub chunk_size: Option<usize>,
    /// Tokens shared between chunks (0-500)
    #[arg(long)]
    pub overlap: Option<usize>,
    /// Settings JSON (default: vectorizer.json)
    #[arg(long, env = ENV_SETTINGS)]
    pub settings: Option<PathBuf>,
    /// Print chunks as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ChunkRecord<'a> {
    index: usize,
    token_count: usize,
    content: &'a str,
}

impl Command {
    pub fn run(&self, out: &mut dyn Write) -> Result<()> {
        match self {
            Command::Chunk(args) => run_chunk(args, out),
            Command::Structure { input, settings } => {
                run_structure(input, settings.as_deref(), out)
            }
            Command::Detect { input } => run_detect(input, out),
        }
    }
}

impl ChunkArgs {
    pub fn overrides(&self) -> ChunkOverrides {
        ChunkOverrides {
            strategy: self.strategy.clone(),
            chunk_size: self.chunk_size,
            overlap: self.overlap,
        }
    }
}

/// Settings file: `--settings` (or `$VECTORIZER_SETTINGS`), else
/// `vectorizer.json` in the working directory.
fn load_settings(explicit: Option<&Path>) -> Result<ChunkSettings> {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    debug!("Loading settings from {}", path.display());
    ChunkSettings::load(path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
}

fn run_chunk(args: &ChunkArgs, out: &mut dyn Write) -> Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    let text = read_input(&args.input)?;

    let chunker = DocumentChunker::new(settings);
    let chunks = chunker.chunk_document(&text, &args.overrides())?;
    write_chunks(&chunks, chunker.estimator(), args.json, out)
}

fn write_chunks(
    chunks: &[String],
    estimator: &dyn TokenEstimator,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    if json {
        let records: Vec<ChunkRecord<'_>> = chunks
            .iter()
            .enumerate()
            .map(|(index, content)| ChunkRecord {
                index,
                token_count: estimator.count_tokens(content),
                content,
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(());
    }

    for (index, content) in chunks.iter().enumerate() {
        writeln!(
            out,
            "--- chunk {} (~{} tokens) ---",
            index,
            estimator.count_tokens(content)
        )?;
        writeln!(out, "{}", content)?;
    }
    Ok(())
}

fn run_structure(input: &str, settings: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let settings = load_settings(settings)?;
    let text = read_input(input)?;

    let estimator = create_estimator(&settings.model);
    let elements = parse_markdown_structure(&text, estimator.as_ref());
    serde_json::to_writer_pretty(&mut *out, &elements)?;
    writeln!(out)?;
    Ok(())
}

fn run_detect(input: &str, out: &mut dyn Write) -> Result<()> {
    let text = read_input(input)?;
    let indicators = detect_indicators(&text);

    let report = serde_json::json!({
        "markdown": indicators.is_markdown(),
        "indicators": indicators,
    });
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
