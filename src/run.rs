//! K-mer counting from inputs and output.
//!
//! This module connects the scanner to files and stdin, counts several
//! independent inputs in parallel, and writes finished histograms in the
//! supported output formats.

use std::{
    io::{stdout, BufWriter, Write},
    path::Path,
};

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    alphabet::DNA,
    cli::OutputFormat,
    config::ScanConfig,
    error::KmerCountError,
    histogram::KmerHistogram,
    input::Input,
    kmer::index_to_kmer,
    progress::{Progress, ProgressTracker},
    scanner::{scan_reader, ScanStats},
};

#[cfg(feature = "tracing")]
use tracing::info;

/// A k-mer with its count, used for JSON serialization.
#[derive(Serialize)]
struct KmerCount {
    kmer: String,
    count: u64,
}

/// Counts k-mers of length `k` in the FASTA file at `path`.
///
/// # Errors
///
/// Returns an error if `k` is invalid, the file cannot be opened, or reading
/// fails.
pub fn count_path<P: AsRef<Path>>(path: P, k: usize) -> Result<KmerHistogram, KmerCountError> {
    count_path_with_progress(path, k, |_| {})
}

/// Counts k-mers in a file, invoking `callback` after every chunk read.
///
/// # Errors
///
/// Returns an error if `k` is invalid, the file cannot be opened, or reading
/// fails.
pub fn count_path_with_progress<P, F>(
    path: P,
    k: usize,
    callback: F,
) -> Result<KmerHistogram, KmerCountError>
where
    P: AsRef<Path>,
    F: FnMut(Progress),
{
    let config = ScanConfig::from_k(k)?;
    let input = Input::File(path.as_ref().to_path_buf());
    let (histogram, _) = count_input(&input, &config, callback)?;
    Ok(histogram)
}

/// Counts one input with an explicit configuration.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or reading fails.
pub fn count_input<F>(
    input: &Input,
    config: &ScanConfig,
    mut callback: F,
) -> Result<(KmerHistogram, ScanStats), KmerCountError>
where
    F: FnMut(Progress),
{
    let reader = input.open()?;
    scan_reader(reader, config, &DNA, |stats| callback(Progress::from(stats)))
}

/// Counts several inputs in parallel and merges their histograms.
///
/// Each input is scanned independently with its own histogram, so no
/// synchronization is needed until the final merge. An empty `inputs` slice
/// yields an all-zero histogram.
///
/// # Errors
///
/// Returns the first error encountered by any input.
pub fn count_inputs(
    inputs: &[Input],
    config: &ScanConfig,
) -> Result<(KmerHistogram, ScanStats), KmerCountError> {
    count_inputs_with_progress(inputs, config, |_| {})
}

/// Like [`count_inputs`], reporting combined progress across all inputs.
///
/// `callback` may be invoked concurrently from several worker threads.
///
/// # Errors
///
/// Returns the first error encountered by any input.
pub fn count_inputs_with_progress<F>(
    inputs: &[Input],
    config: &ScanConfig,
    callback: F,
) -> Result<(KmerHistogram, ScanStats), KmerCountError>
where
    F: Fn(Progress) + Sync,
{
    #[cfg(feature = "tracing")]
    info!(inputs = inputs.len(), k = config.k().get(), "Counting inputs");

    let tracker = ProgressTracker::new();

    let merged = inputs
        .par_iter()
        .map(|input| {
            let mut last = Progress::default();
            count_input(input, config, |progress| {
                tracker.record(&progress.since(&last));
                last = progress;
                callback(tracker.snapshot());
            })
        })
        .try_reduce_with(|(mut left, left_stats), (right, right_stats)| {
            left.merge(&right)?;
            Ok((left, left_stats + right_stats))
        });

    match merged {
        Some(result) => result,
        None => Ok((KmerHistogram::new(config.k())?, ScanStats::default())),
    }
}

/// Counts the FASTA files at `paths` in parallel and merges the results.
///
/// # Errors
///
/// Returns an error if `k` is invalid or any file fails to open or read.
pub fn count_kmers_files<P: AsRef<Path>>(
    paths: &[P],
    k: usize,
) -> Result<KmerHistogram, KmerCountError> {
    let config = ScanConfig::from_k(k)?;
    let inputs: Vec<Input> = paths
        .iter()
        .map(|path| Input::from_path(path.as_ref()))
        .collect();
    let (histogram, _) = count_inputs(&inputs, &config)?;
    Ok(histogram)
}

/// Counts `inputs` and writes the histogram to stdout.
///
/// # Errors
///
/// Returns an error on read, write, or serialization failure.
pub fn run_with_options(
    inputs: &[Input],
    config: &ScanConfig,
    format: OutputFormat,
    min_count: u64,
) -> Result<ScanStats, KmerCountError> {
    let (histogram, stats) = count_inputs(inputs, config)?;
    let mut buf = BufWriter::new(stdout());
    write_histogram(&mut buf, &histogram, format, min_count)?;
    Ok(stats)
}

/// Writes a histogram in the given format.
///
/// `min_count` filters the sparse formats (FASTA, TSV, JSON). The dense
/// format always writes all `4^k` counts so that line `i` is slot `i`.
///
/// # Errors
///
/// Returns an error if writing or JSON serialization fails.
pub fn write_histogram<W: Write>(
    writer: &mut W,
    histogram: &KmerHistogram,
    format: OutputFormat,
    min_count: u64,
) -> Result<(), KmerCountError> {
    let write_err = |source: std::io::Error| KmerCountError::WriteError { source };
    let k = histogram.k();
    let min_count = min_count.max(1);
    let filtered = histogram
        .iter_nonzero()
        .filter(|&(_, count)| count >= min_count);

    match format {
        OutputFormat::Fasta => {
            for (index, count) in filtered {
                let kmer = index_to_kmer(index, k)?;
                writeln!(writer, ">{count}\n{kmer}").map_err(write_err)?;
            }
        }
        OutputFormat::Tsv => {
            for (index, count) in filtered {
                let kmer = index_to_kmer(index, k)?;
                writeln!(writer, "{kmer}\t{count}").map_err(write_err)?;
            }
        }
        OutputFormat::Json => {
            let mut json_data = Vec::new();
            for (index, count) in filtered {
                json_data.push(KmerCount {
                    kmer: index_to_kmer(index, k)?,
                    count,
                });
            }
            serde_json::to_writer_pretty(&mut *writer, &json_data)?;
            writeln!(writer).map_err(write_err)?;
        }
        OutputFormat::Dense => {
            for &count in histogram.counts() {
                writeln!(writer, "{count}").map_err(write_err)?;
            }
        }
    }

    writer.flush().map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count_kmers;

    fn render(input: &str, k: usize, format: OutputFormat, min_count: u64) -> String {
        let histogram = count_kmers(input.as_bytes(), k).unwrap();
        let mut out = Vec::new();
        write_histogram(&mut out, &histogram, format, min_count).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn fasta_output() {
        insta::assert_snapshot!(render(">s\nACGTA\n", 2, OutputFormat::Fasta, 1).trim_end(), @r"
        >1
        AC
        >1
        CG
        >1
        GT
        >1
        TA
        ");
    }

    #[test]
    fn tsv_output_with_min_count() {
        let out = render(">s\nAAAAC\n", 2, OutputFormat::Tsv, 2);
        assert_eq!(out, "AA\t3\n");
    }

    #[test]
    fn json_output() {
        let out = render("ACA", 2, OutputFormat::Json, 1);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                {"kmer": "AC", "count": 1},
                {"kmer": "CA", "count": 1}
            ])
        );
    }

    #[test]
    fn dense_output_lists_every_slot() {
        let out = render("ACGT", 1, OutputFormat::Dense, 5);
        assert_eq!(out, "1\n1\n1\n1\n");
        let out = render("ACGT", 2, OutputFormat::Dense, 1);
        assert_eq!(out.lines().count(), 16);
    }

    #[test]
    fn no_inputs_gives_zeroed_histogram() {
        let config = ScanConfig::from_k(3).unwrap();
        let (histogram, stats) = count_inputs(&[], &config).unwrap();
        assert_eq!(histogram.slots(), 64);
        assert_eq!(histogram.total(), 0);
        assert_eq!(stats, ScanStats::default());
    }
}
