//! Lexarc CLI - alphabet-seeded LZW text compression.
//!
//! Compresses `.txt` files into self-describing `.lzw` archives and back.

use clap::{Parser, Subcommand};
use lexarc_lzw::{EncodeStats, EncodeTrace, StepAction, compress_traced, compress_with_stats};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lexarc")]
#[command(
    author,
    version,
    about = "Alphabet-seeded LZW text compressor"
)]
#[command(long_about = "
Lexarc compresses text files with an LZW variant whose dictionary is seeded
from the file's own character set.

Examples:
  lexarc compress notes.txt
  lexarc compress notes.txt --trace
  lexarc compress notes.txt --json
  lexarc decompress notes.lzw
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a .txt file into a .lzw archive
    #[command(alias = "c")]
    Compress {
        /// Text file to compress (must end in .txt)
        path: PathBuf,

        /// Print the per-step encoder decision table
        #[arg(short, long)]
        trace: bool,

        /// Emit the compression report as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Decompress a .lzw archive back into a .txt file
    #[command(alias = "d")]
    Decompress {
        /// Archive to decompress (must end in .lzw)
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress { path, trace, json } => cmd_compress(&path, trace, json),
        Commands::Decompress { path } => cmd_decompress(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Compression report for the machine-readable output mode.
#[derive(Serialize)]
struct CompressionReport {
    input: String,
    output: String,
    symbol_count: usize,
    initial_width: u32,
    code_bits: u64,
    escape_count: usize,
    ratio: f64,
    archive_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Vec<serde_json::Value>>,
}

fn cmd_compress(path: &Path, trace: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    require_extension(path, "txt")?;

    let text = std::fs::read_to_string(path)?;

    let (archive, stats, steps) = if trace {
        let (archive, stats, steps) = compress_traced(&text)?;
        (archive, stats, Some(steps))
    } else {
        let (archive, stats) = compress_with_stats(&text)?;
        (archive, stats, None)
    };

    let out = output_path(path, "lzw");
    std::fs::write(&out, &archive)?;

    if json {
        let report = CompressionReport {
            input: path.display().to_string(),
            output: out.display().to_string(),
            symbol_count: stats.symbol_count,
            initial_width: stats.initial_width,
            code_bits: stats.code_bits,
            escape_count: stats.escape_count,
            ratio: stats.ratio(),
            archive_bytes: archive.len(),
            trace: steps.as_ref().map(trace_rows),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(path, &out, &stats, archive.len());
        if let Some(steps) = &steps {
            print_trace(steps);
        }
    }

    Ok(())
}

fn cmd_decompress(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    require_extension(path, "lzw")?;

    let data = std::fs::read(path)?;
    let text = lexarc_lzw::decompress(&data)?;

    let out = output_path(path, "txt");
    std::fs::write(&out, &text)?;

    println!(
        "Decompressed {} -> {} ({} bytes)",
        path.display(),
        out.display(),
        text.len()
    );
    Ok(())
}

/// Refuse the wrong suffix for a mode before any file is opened.
fn require_extension(path: &Path, expected: &str) -> Result<(), Box<dyn std::error::Error>> {
    if path.extension().and_then(|e| e.to_str()) != Some(expected) {
        return Err(format!(
            "file format must be '.txt' for compression and '.lzw' for decompression (got {})",
            path.display()
        )
        .into());
    }
    Ok(())
}

/// Output name: input stem with the new extension, in the working directory.
fn output_path(input: &Path, extension: &str) -> PathBuf {
    PathBuf::from(input.file_stem().unwrap_or_default()).with_extension(extension)
}

fn print_summary(input: &Path, output: &Path, stats: &EncodeStats, archive_bytes: usize) {
    println!("Compressed {} -> {}", input.display(), output.display());
    println!("  Symbols: {}", stats.symbol_count);
    println!("  Initial width: {} bits", stats.initial_width);
    println!(
        "  Code bits: {} ({} escape codes)",
        stats.code_bits, stats.escape_count
    );
    println!("  Archive size: {} bytes", archive_bytes);
    println!("  Compression ratio: {:.3}", stats.ratio());
}

fn print_trace(trace: &EncodeTrace) {
    println!();
    println!(
        "{:>5}  {:>6}  {:<16} {:<8} {:>6} {:>5}",
        "step", "symbol", "buffer", "action", "code", "bits"
    );
    for (i, step) in trace.steps().iter().enumerate() {
        let (action, code) = describe_action(step.action);
        println!(
            "{:>5}  {:>6}  {:<16} {:<8} {:>6} {:>5}",
            i,
            step.symbol.map(String::from).unwrap_or_default(),
            step.buffer,
            action,
            code.map(|c| c.to_string()).unwrap_or_default(),
            step.width
        );
    }
}

fn trace_rows(trace: &EncodeTrace) -> Vec<serde_json::Value> {
    trace
        .steps()
        .iter()
        .map(|step| {
            let (action, code) = describe_action(step.action);
            serde_json::json!({
                "symbol": step.symbol,
                "buffer": step.buffer,
                "action": action,
                "code": code,
                "dict_len": step.dict_len,
                "width": step.width,
            })
        })
        .collect()
}

fn describe_action(action: StepAction) -> (&'static str, Option<usize>) {
    match action {
        StepAction::Extend => ("extend", None),
        StepAction::Emit { code } => ("emit", Some(code)),
        StepAction::Escape { code } => ("escape", Some(code)),
        StepAction::Final { code } => ("final", Some(code)),
    }
}
