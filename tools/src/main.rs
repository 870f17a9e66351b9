use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use compress::{CompressionBackend, CompressionConfig};
use glob::Pattern;
use log::debug;
use serde::Deserialize;
use ticksync_tools::{decode_buffer_json, format_decode_pretty, inspect_buffer, InspectReport};
use wire::{Limits, MessageCodec};

#[derive(Parser)]
#[command(
    name = "ticksync-tools",
    version,
    about = "ticksync capture inspection and decoding tools"
)]
struct Cli {
    /// Compression backend the capturing peer used.
    #[arg(long, value_enum, global = true, default_value_t = Backend::PreferNative)]
    backend: Backend,
    /// Lift the decode limits for oversized captures.
    #[arg(long, global = true)]
    unlimited: bool,
    /// JSON file with `compression` and `limits` sections; overrides the flags above.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect message tags and sizes.
    Inspect {
        /// Path to a capture file or a directory of captures.
        capture_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected captures.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected captures (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode a capture into structured output.
    Decode {
        /// Path to the capture bytes.
        capture_file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    Miniz,
    Flate2,
    PreferNative,
    Passthrough,
}

impl From<Backend> for CompressionBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Miniz => Self::Miniz,
            Backend::Flate2 => Self::Flate2,
            Backend::PreferNative => Self::PreferNative,
            Backend::Passthrough => Self::Passthrough,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ToolConfig {
            compression: CompressionConfig::with_backend(cli.backend.into()),
            limits: if cli.unlimited {
                Limits::unlimited()
            } else {
                Limits::default()
            },
        },
    };
    let codec =
        MessageCodec::from_config(&config.compression, config.limits).context("configure codec")?;
    debug!("using {:?} backend", codec.compressor().backend());

    match cli.command {
        Command::Inspect {
            capture_path,
            glob,
            sort,
            limit,
        } => {
            if capture_path.is_dir() {
                let entries = collect_capture_entries(&capture_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let report = inspect_file(&entry.path, &codec)?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print_inspect_report(&report);
                }
            } else {
                print_inspect_report(&inspect_file(&capture_path, &codec)?);
            }
        }
        Command::Decode {
            capture_file,
            format,
        } => {
            let bytes = read_capture(&capture_file)?;
            match format {
                DecodeFormat::Json => {
                    let output = decode_buffer_json(&bytes, &codec)?;
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    let messages = codec
                        .decode_many(&bytes)
                        .with_context(|| format!("decode {}", capture_file.display()))?;
                    print!("{}", format_decode_pretty(&messages));
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ToolConfig {
    compression: CompressionConfig,
    limits: Limits,
}

fn load_config(path: &Path) -> Result<ToolConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&contents).context("parse config json")
}

fn read_capture(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read capture {}", path.display()))
}

fn inspect_file(path: &Path, codec: &MessageCodec) -> Result<InspectReport> {
    let bytes = read_capture(path)?;
    inspect_buffer(&bytes, codec).with_context(|| format!("decode {}", path.display()))
}

struct CaptureEntry {
    path: PathBuf,
    size: u64,
}

fn collect_capture_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<CaptureEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(CaptureEntry { path, size });
    }
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<CaptureEntry>,
    sort: Option<InspectSort>,
) -> Vec<CaptureEntry> {
    if let Some(InspectSort::Size) = sort {
        entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    }
    entries
}

fn print_inspect_report(report: &InspectReport) {
    println!(
        "{} messages, {} bytes",
        report.messages.len(),
        report.total_bytes
    );
    for summary in &report.messages {
        println!(
            "  @{:<6} {:?} ({} bytes, {:?}): {}",
            summary.offset, summary.tag, summary.byte_len, summary.direction, summary.detail
        );
    }
}
