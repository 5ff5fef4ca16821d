//! # kmer-total
//!
//! A streaming k-mer counter that produces a dense histogram with one slot
//! for every possible k-mer over `{A,C,G,T}`.
//!
//! Input is plain FASTA text read in fixed-size chunks: header lines are
//! skipped, line breaks inside sequences are transparent, and any window that
//! touches a non-ACGT byte is left out. Slot `i` of the histogram holds the
//! number of occurrences of the k-mer whose base-4 index is `i`
//! (A=0, C=1, G=2, T=3, most significant base first).
//!
//! ## Quick start
//!
//! ```rust
//! use kmer_total::{count_kmers, index_to_kmer, kmer_to_index};
//!
//! let histogram = count_kmers(&b">h1\nAC\nGT\n>h2\nAA\n"[..], 2)?;
//!
//! assert_eq!(histogram.get(kmer_to_index("CG")?), Some(1));
//! assert_eq!(histogram.total(), 4);
//!
//! for (index, count) in histogram.iter_nonzero() {
//!     println!("{}\t{count}", index_to_kmer(index, histogram.k())?);
//! }
//! # Ok::<(), kmer_total::error::KmerCountError>(())
//! ```
//!
//! ## Modules
//!
//! - [`alphabet`]: byte classification table
//! - [`kmer`]: k-mer lengths and index/string conversion
//! - [`window`]: per-window index calculation
//! - [`scanner`]: the chunked FASTA state machine
//! - [`histogram`]: the dense count array, spectrum and statistics
//! - [`run`]: path-based counting, parallel multi-input counting and output
//! - [`builder`]: fluent configuration API

pub mod alphabet;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod histogram;
pub mod input;
pub mod kmer;
pub mod progress;
pub mod run;
pub mod scanner;
pub mod window;

use std::io::Read;

pub use crate::{
    error::KmerCountError,
    histogram::KmerHistogram,
    kmer::{index_to_kmer, kmer_to_index, KmerLength},
};

use crate::{alphabet::DNA, config::ScanConfig, scanner::scan_reader};

/// Counts every k-mer of length `k` in a FASTA byte stream.
///
/// # Errors
///
/// Returns [`KmerCountError::InvalidKmerLength`] if `k` is outside
/// `1..=31`, [`KmerCountError::HistogramTooLarge`] if `4^k` counters cannot
/// be allocated, and [`KmerCountError::StreamRead`] if reading fails. No
/// partial histogram is returned on error.
pub fn count_kmers<R: Read>(reader: R, k: usize) -> Result<KmerHistogram, KmerCountError> {
    let config = ScanConfig::from_k(k)?;
    let (histogram, _) = scan_reader(reader, &config, &DNA, |_| {})?;
    Ok(histogram)
}
