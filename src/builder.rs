//! Builder pattern API for ergonomic k-mer counting.
//!
//! This module provides a fluent builder interface for configuring and executing
//! k-mer counting operations.
//!
//! # Example
//!
//! ```rust
//! use kmer_total::builder::KmerCounter;
//!
//! let histogram = KmerCounter::new()
//!     .k(3)?
//!     .chunk_size(4)
//!     .count_reader(&b">seq\nGATTACA\n"[..])?;
//!
//! assert_eq!(histogram.get_kmer("TTA")?, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{
    io::{Read, Write},
    path::Path,
};

use crate::{
    alphabet::DNA,
    cli::OutputFormat,
    config::{ScanConfig, DEFAULT_CHUNK_SIZE},
    error::{BuilderError, KmerLengthError},
    histogram::KmerHistogram,
    input::Input,
    kmer::KmerLength,
    progress::Progress,
    run::{count_input, count_inputs, write_histogram},
    scanner::scan_reader,
};

/// A builder for configuring k-mer counting operations.
///
/// Use [`KmerCounter::new()`] to create a new builder, configure it with the
/// fluent API, then call one of the counting methods to execute.
#[derive(Debug, Clone)]
pub struct KmerCounter {
    k: Option<KmerLength>,
    chunk_size: usize,
    min_count: u64,
    format: OutputFormat,
}

impl Default for KmerCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl KmerCounter {
    /// Creates a new `KmerCounter` builder with default settings.
    ///
    /// Default settings:
    /// - `k`: None (must be set before counting)
    /// - `chunk_size`: 64 KiB
    /// - `min_count`: 1 (write every k-mer seen)
    /// - `format`: FASTA
    #[must_use]
    pub const fn new() -> Self {
        Self {
            k: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            min_count: 1,
            format: OutputFormat::Fasta,
        }
    }

    /// Sets the k-mer length.
    ///
    /// # Errors
    ///
    /// Returns [`KmerLengthError`] if `k` is outside `1..=31`.
    pub fn k(mut self, k: usize) -> Result<Self, KmerLengthError> {
        self.k = Some(KmerLength::new(k)?);
        Ok(self)
    }

    /// Sets the k-mer length from a pre-validated `KmerLength`.
    #[must_use]
    pub fn k_validated(mut self, k: KmerLength) -> Self {
        self.k = Some(k);
        self
    }

    /// Sets the number of bytes requested per read. Must be at least 1;
    /// checked when counting starts.
    #[must_use]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the minimum count written by [`count_to_writer()`](Self::count_to_writer).
    #[must_use]
    pub fn min_count(mut self, min_count: u64) -> Self {
        self.min_count = min_count;
        self
    }

    /// Sets the output format for [`count_to_writer()`](Self::count_to_writer).
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Validates the settings into a [`ScanConfig`].
    ///
    /// # Errors
    ///
    /// Fails if `k` was never set or the chunk size is zero.
    pub fn config(&self) -> Result<ScanConfig, BuilderError> {
        let k = self.k.ok_or(BuilderError::KmerLengthNotSet)?;
        Ok(ScanConfig::new(k).with_chunk_size(self.chunk_size)?)
    }

    /// Counts k-mers from any byte stream.
    ///
    /// # Errors
    ///
    /// Fails on invalid settings or a read error.
    pub fn count_reader<R: Read>(&self, reader: R) -> Result<KmerHistogram, BuilderError> {
        let (histogram, _) = scan_reader(reader, &self.config()?, &DNA, |_| {})?;
        Ok(histogram)
    }

    /// Counts k-mers in the FASTA file at `path` (`-` for stdin).
    ///
    /// # Errors
    ///
    /// Fails on invalid settings, or if the input cannot be opened or read.
    pub fn count<P: AsRef<Path>>(&self, path: P) -> Result<KmerHistogram, BuilderError> {
        self.count_with_progress(path, |_| {})
    }

    /// Counts k-mers with progress reporting after every chunk.
    ///
    /// # Errors
    ///
    /// Fails on invalid settings, or if the input cannot be opened or read.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kmer_total::builder::KmerCounter;
    ///
    /// let histogram = KmerCounter::new()
    ///     .k(11)?
    ///     .count_with_progress("genome.fa", |progress| {
    ///         eprintln!("{} bytes read", progress.bytes_processed);
    ///     })?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn count_with_progress<P, F>(
        &self,
        path: P,
        callback: F,
    ) -> Result<KmerHistogram, BuilderError>
    where
        P: AsRef<Path>,
        F: FnMut(Progress),
    {
        let input = Input::from_path(path.as_ref());
        let (histogram, _) = count_input(&input, &self.config()?, callback)?;
        Ok(histogram)
    }

    /// Counts several files in parallel into one histogram.
    ///
    /// # Errors
    ///
    /// Fails on invalid settings or the first input that fails.
    pub fn count_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<KmerHistogram, BuilderError> {
        let inputs: Vec<Input> = paths
            .iter()
            .map(|path| Input::from_path(path.as_ref()))
            .collect();
        let (histogram, _) = count_inputs(&inputs, &self.config()?)?;
        Ok(histogram)
    }

    /// Counts k-mers and writes them to `writer` in the configured format.
    ///
    /// # Errors
    ///
    /// Fails on invalid settings, a read error, or a write error.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kmer_total::{builder::KmerCounter, cli::OutputFormat};
    /// use std::{fs::File, io::BufWriter};
    ///
    /// let writer = BufWriter::new(File::create("output.tsv")?);
    ///
    /// KmerCounter::new()
    ///     .k(7)?
    ///     .format(OutputFormat::Tsv)
    ///     .min_count(2)
    ///     .count_to_writer("genome.fa", writer)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn count_to_writer<P, W>(&self, path: P, mut writer: W) -> Result<(), BuilderError>
    where
        P: AsRef<Path>,
        W: Write,
    {
        let histogram = self.count(path)?;
        write_histogram(&mut writer, &histogram, self.format, self.min_count)?;
        Ok(())
    }
}
