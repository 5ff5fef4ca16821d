//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::{config::DEFAULT_CHUNK_SIZE, kmer::MAX_K};

/// A streaming k-mer counter producing dense k-mer histograms from FASTA files.
#[derive(Parser, Debug)]
#[command(name = "kmer-total")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// K-mer length (1-31)
    #[arg(value_parser = parse_k)]
    pub k: usize,

    /// FASTA files to count (omit or use '-' for stdin)
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "fasta")]
    pub format: OutputFormat,

    /// Minimum count threshold (k-mers below this are excluded; ignored by the dense format)
    #[arg(short, long, default_value = "1")]
    pub min_count: u64,

    /// Bytes requested from the input per read
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    pub chunk_size: usize,

    /// Suppress informational output (only output k-mer counts)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for k-mer counts.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// FASTA-like format (>{count}\n{kmer})
    #[default]
    Fasta,
    /// Tab-separated values (kmer\tcount)
    Tsv,
    /// JSON array format
    Json,
    /// Every slot's count, one per line, in k-mer index order
    Dense,
}

fn parse_k(s: &str) -> Result<usize, String> {
    let k: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if k == 0 {
        return Err("k-mer length must be at least 1".to_string());
    }
    if k > MAX_K {
        return Err(format!("k-mer length must be at most {MAX_K}"));
    }
    Ok(k)
}

fn parse_chunk_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("chunk size must be at least 1 byte".to_string()),
        Ok(size) => Ok(size),
        Err(_) => Err(format!("'{s}' is not a valid number")),
    }
}
