//! Streaming FASTA scanner.
//!
//! The scanner consumes input in fixed-size chunks and never holds more than
//! one chunk plus a short carried tail, so sequences of any length are counted
//! in bounded memory.
//!
//! # State machine
//!
//! - **scanning sequence**: every byte offset holding a base starts a window.
//!   A `>` switches to header mode and discards any partial window.
//! - **seeking header end**: bytes are discarded until `\n`, after which
//!   scanning resumes with no bases carried over from before the header.
//!
//! # Chunk boundaries
//!
//! A window that runs off the end of a chunk is left unresolved. Its base
//! bytes (never more than `k - 1`) become the pending tail, which is placed in
//! front of the next chunk. Whitespace is transparent inside a window, so
//! dropping it from the tail changes nothing, and the tail stays bounded even
//! for inputs with arbitrarily long runs of blank lines. Windows before the
//! tail were already resolved and are never revisited.

use std::io::{ErrorKind, Read};

use crate::{
    alphabet::{Alphabet, ByteClass},
    config::ScanConfig,
    error::KmerCountError,
    histogram::KmerHistogram,
    kmer::KmerLength,
    window::{Window, WindowCalculator},
};

#[cfg(feature = "tracing")]
use tracing::{debug, info, info_span};

/// Counters describing one finished (or in-progress) scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Header records seen.
    pub records: u64,
    /// Bytes read from the input.
    pub bytes_read: u64,
    /// Base bytes seen outside of headers.
    pub bases: u64,
    /// Windows added to the histogram.
    pub windows_counted: u64,
    /// Windows rejected because they overlap an invalid byte.
    pub windows_skipped: u64,
}

impl std::ops::Add for ScanStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            records: self.records + rhs.records,
            bytes_read: self.bytes_read + rhs.bytes_read,
            bases: self.bases + rhs.bases,
            windows_counted: self.windows_counted + rhs.windows_counted,
            windows_skipped: self.windows_skipped + rhs.windows_skipped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekHeaderEnd,
    ScanSequence,
}

/// Incremental k-mer counter over a chunked byte stream.
///
/// # Example
///
/// ```rust
/// use kmer_total::{alphabet::DNA, kmer::{kmer_to_index, KmerLength}, scanner::RecordScanner};
///
/// let mut scanner = RecordScanner::new(&DNA, KmerLength::new(3)?)?;
/// scanner.feed(b">read 1\nGAT");
/// scanner.feed(b"TA\nCA\n");
/// let (histogram, stats) = scanner.finish();
///
/// assert_eq!(stats.windows_counted, 5);
/// assert_eq!(histogram.get(kmer_to_index("TTA")?), Some(1));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RecordScanner<'a> {
    alphabet: &'a Alphabet,
    calculator: WindowCalculator<'a>,
    state: State,
    pending: Vec<u8>,
    buffer: Vec<u8>,
    histogram: KmerHistogram,
    stats: ScanStats,
}

impl<'a> RecordScanner<'a> {
    /// Creates a scanner with a zeroed histogram.
    ///
    /// # Errors
    ///
    /// Fails if the histogram for `k` cannot be allocated.
    pub fn new(alphabet: &'a Alphabet, k: KmerLength) -> Result<Self, KmerCountError> {
        Ok(Self {
            alphabet,
            calculator: WindowCalculator::new(alphabet, k),
            state: State::ScanSequence,
            pending: Vec::with_capacity(k.get()),
            buffer: Vec::new(),
            histogram: KmerHistogram::new(k)?,
            stats: ScanStats::default(),
        })
    }

    /// Processes the next chunk of input.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.stats.bytes_read += chunk.len() as u64;

        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.clear();
        buffer.append(&mut self.pending);
        buffer.extend_from_slice(chunk);

        let mut pos = 0;
        while pos < buffer.len() {
            match self.state {
                State::SeekHeaderEnd => match buffer[pos..].iter().position(|&b| b == b'\n') {
                    Some(offset) => {
                        pos += offset + 1;
                        self.state = State::ScanSequence;
                    }
                    None => pos = buffer.len(),
                },
                State::ScanSequence => match self.alphabet.classify(buffer[pos]) {
                    ByteClass::Separator => {
                        self.stats.records += 1;
                        self.state = State::SeekHeaderEnd;
                        pos += 1;
                    }
                    ByteClass::Whitespace | ByteClass::Invalid => pos += 1,
                    ByteClass::Base(_) => match self.calculator.compute(&buffer, pos) {
                        Window::Valid { index } => {
                            self.histogram.increment(index);
                            self.stats.bases += 1;
                            self.stats.windows_counted += 1;
                            pos += 1;
                        }
                        Window::Invalid { at } => {
                            let bases = self.count_bases(&buffer[pos..at]);
                            self.stats.bases += bases;
                            if self.alphabet.classify(buffer[at]) == ByteClass::Invalid {
                                self.stats.windows_skipped += bases;
                            }
                            // The offending byte is handled by the next iteration.
                            pos = at;
                        }
                        Window::Starved => {
                            let alphabet = self.alphabet;
                            self.pending.extend(
                                buffer[pos..]
                                    .iter()
                                    .filter(|&&b| alphabet.code(b).is_some()),
                            );
                            break;
                        }
                    },
                },
            }
        }

        #[cfg(feature = "tracing")]
        debug!(
            chunk = chunk.len(),
            pending = self.pending.len(),
            in_header = self.is_in_header(),
            "Scanned chunk"
        );

        self.buffer = buffer;
    }

    fn count_bases(&self, bytes: &[u8]) -> u64 {
        bytes
            .iter()
            .filter(|&&b| self.alphabet.code(b).is_some())
            .count() as u64
    }

    /// Whether the scanner is currently inside a header line.
    pub fn is_in_header(&self) -> bool {
        self.state == State::SeekHeaderEnd
    }

    /// Number of carried base bytes waiting for more input.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Counters so far.
    pub const fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Ends the scan.
    ///
    /// Carried bases cannot complete a window any more and are dropped, as is
    /// an unterminated trailing header.
    pub fn finish(mut self) -> (KmerHistogram, ScanStats) {
        self.stats.bases += self.pending.len() as u64;
        (self.histogram, self.stats)
    }
}

/// Counts k-mers from `reader`, calling `on_progress` after every chunk.
///
/// Reads interrupted by a signal are retried. Any other read error aborts the
/// run and the partial histogram is dropped.
pub fn scan_reader<R, F>(
    mut reader: R,
    config: &ScanConfig,
    alphabet: &Alphabet,
    mut on_progress: F,
) -> Result<(KmerHistogram, ScanStats), KmerCountError>
where
    R: Read,
    F: FnMut(&ScanStats),
{
    #[cfg(feature = "tracing")]
    let _span = info_span!("scan", k = config.k().get()).entered();

    #[cfg(feature = "tracing")]
    info!(
        k = config.k().get(),
        chunk_size = config.chunk_size(),
        "Starting k-mer scan"
    );

    let mut scanner = RecordScanner::new(alphabet, config.k())?;
    let mut chunk = vec![0u8; config.chunk_size()];

    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => return Err(KmerCountError::StreamRead { source }),
        };
        scanner.feed(&chunk[..read]);
        on_progress(scanner.stats());
    }

    let (histogram, stats) = scanner.finish();

    #[cfg(feature = "tracing")]
    info!(
        records = stats.records,
        bytes = stats.bytes_read,
        counted = stats.windows_counted,
        skipped = stats.windows_skipped,
        "K-mer scan complete"
    );

    Ok((histogram, stats))
}
