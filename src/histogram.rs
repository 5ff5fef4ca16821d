//! Dense k-mer count histograms.
//!
//! A [`KmerHistogram`] holds one counter for every possible k-mer of a fixed
//! length, indexed by the k-mer index (see [`crate::kmer`]). It also derives
//! the k-mer frequency spectrum (count of counts), which is fundamental for
//! genome size estimation, error detection, and heterozygosity analysis.
//!
//! # Example
//!
//! ```rust
//! use kmer_total::count_kmers;
//!
//! let histogram = count_kmers(&b">seq\nACGTACGT\n"[..], 2)?;
//!
//! assert_eq!(histogram.get_kmer("AC")?, 2);
//! assert_eq!(histogram.total(), 7);
//!
//! // CG, GT and AC appear twice; TA appears once.
//! let spectrum = histogram.spectrum();
//! assert_eq!(spectrum.get(&2), Some(&3));
//! assert_eq!(spectrum.get(&1), Some(&1));
//! # Ok::<(), kmer_total::error::KmerCountError>(())
//! ```

use std::collections::BTreeMap;

use crate::{
    error::KmerCountError,
    kmer::{kmer_to_index, KmerLength},
};

/// K-mer frequency spectrum: maps count -> number of distinct k-mers with that count.
///
/// Uses `BTreeMap` for sorted iteration (counts in ascending order).
pub type KmerSpectrum = BTreeMap<u64, u64>;

/// Summary statistics for a k-mer spectrum.
///
/// These statistics are useful for genome analysis:
/// - `total_kmers`: Total k-mer occurrences (sum of all counts)
/// - `distinct_kmers`: Number of k-mers seen at least once
/// - `mode_count`: The count value that appears most frequently
/// - `mode_frequency`: How many k-mers have the mode count
/// - `mean_count`: Average count per distinct k-mer
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramStats {
    /// Total k-mer occurrences (sum of all k-mer counts).
    pub total_kmers: u64,
    /// Number of distinct k-mers with a non-zero count.
    pub distinct_kmers: u64,
    /// The count value that appears most frequently (mode of the distribution).
    pub mode_count: u64,
    /// Number of k-mers that have the mode count.
    pub mode_frequency: u64,
    /// Average k-mer count (`total_kmers` / `distinct_kmers`).
    pub mean_count: f64,
}

/// A dense array of `4^k` counters, one per k-mer index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerHistogram {
    k: KmerLength,
    counts: Vec<u64>,
}

impl KmerHistogram {
    /// Allocates a zeroed histogram for k-mers of length `k`.
    ///
    /// # Errors
    ///
    /// Returns [`KmerCountError::HistogramTooLarge`] if `4^k` counters cannot
    /// be addressed or allocated on this platform.
    pub fn new(k: KmerLength) -> Result<Self, KmerCountError> {
        let too_large = || KmerCountError::HistogramTooLarge { k: k.get() };

        let slots = usize::try_from(k.space()).map_err(|_| too_large())?;
        let mut counts = Vec::new();
        counts.try_reserve_exact(slots).map_err(|_| too_large())?;
        counts.resize(slots, 0);

        Ok(Self { k, counts })
    }

    /// The k-mer length this histogram counts.
    pub const fn k(&self) -> KmerLength {
        self.k
    }

    /// Number of slots, always `4^k`.
    pub fn slots(&self) -> usize {
        self.counts.len()
    }

    /// Returns the count at `index`, or `None` if `index >= 4^k`.
    pub fn get(&self, index: u64) -> Option<u64> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.counts.get(i))
            .copied()
    }

    /// Returns the count of a k-mer given as text.
    ///
    /// # Errors
    ///
    /// Fails if `kmer` contains a non-base byte or its length is not `k`.
    pub fn get_kmer<S: AsRef<[u8]>>(&self, kmer: S) -> Result<u64, KmerCountError> {
        let kmer = kmer.as_ref();
        if kmer.len() != self.k.get() {
            return Err(KmerCountError::LengthMismatch {
                left: self.k.get(),
                right: kmer.len(),
            });
        }
        let index = kmer_to_index(kmer)?;
        self.get(index)
            .ok_or(KmerCountError::IndexOutOfRange {
                index,
                k: self.k.get(),
            })
    }

    /// Adds one occurrence of `index`.
    ///
    /// Indices come from a window calculator of the same `k` and are always in
    /// range.
    #[inline]
    pub(crate) fn increment(&mut self, index: u64) {
        debug_assert!(index < self.k.space());
        if let Some(slot) = usize::try_from(index)
            .ok()
            .and_then(|i| self.counts.get_mut(i))
        {
            *slot += 1;
        }
    }

    /// Adds every count of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`KmerCountError::LengthMismatch`] if the two histograms were
    /// built for different `k`.
    pub fn merge(&mut self, other: &Self) -> Result<(), KmerCountError> {
        if self.k != other.k {
            return Err(KmerCountError::LengthMismatch {
                left: self.k.get(),
                right: other.k.get(),
            });
        }
        for (slot, count) in self.counts.iter_mut().zip(&other.counts) {
            *slot += count;
        }
        Ok(())
    }

    /// All counts in index order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Consumes the histogram and returns its counts.
    pub fn into_counts(self) -> Vec<u64> {
        self.counts
    }

    /// Iterates `(index, count)` over every slot.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        (0u64..).zip(self.counts.iter().copied())
    }

    /// Iterates `(index, count)` over slots with a non-zero count.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.iter().filter(|&(_, count)| count > 0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of k-mers seen at least once.
    pub fn distinct(&self) -> u64 {
        self.counts.iter().filter(|&&count| count > 0).count() as u64
    }

    /// Computes the frequency spectrum over k-mers seen at least once.
    pub fn spectrum(&self) -> KmerSpectrum {
        let mut spectrum = BTreeMap::new();
        for (_, count) in self.iter_nonzero() {
            *spectrum.entry(count).or_insert(0) += 1;
        }
        spectrum
    }

    /// Summary statistics of this histogram's spectrum.
    pub fn stats(&self) -> HistogramStats {
        spectrum_stats(&self.spectrum())
    }
}

/// Computes summary statistics for a k-mer spectrum.
///
/// # Example
///
/// ```rust
/// use kmer_total::histogram::{spectrum_stats, KmerSpectrum};
///
/// let spectrum: KmerSpectrum = [(1, 2), (2, 2)].into();
/// let stats = spectrum_stats(&spectrum);
///
/// assert_eq!(stats.distinct_kmers, 4);
/// assert_eq!(stats.total_kmers, 6); // 1+1+2+2
/// ```
#[must_use]
pub fn spectrum_stats(spectrum: &KmerSpectrum) -> HistogramStats {
    let distinct: u64 = spectrum.values().sum();
    let total: u64 = spectrum.iter().map(|(c, f)| c * f).sum();

    let (mode_count, mode_frequency) = spectrum
        .iter()
        .max_by_key(|(_, f)| *f)
        .map_or((0, 0), |(&c, &f)| (c, f));

    HistogramStats {
        total_kmers: total,
        distinct_kmers: distinct,
        mode_count,
        mode_frequency,
        #[allow(clippy::cast_precision_loss)]
        mean_count: if distinct > 0 {
            total as f64 / distinct as f64
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram(k: usize, indices: &[u64]) -> KmerHistogram {
        let mut hist = KmerHistogram::new(KmerLength::new(k).unwrap()).unwrap();
        for &index in indices {
            hist.increment(index);
        }
        hist
    }

    #[test]
    fn new_histogram_is_zeroed() {
        let hist = histogram(3, &[]);
        assert_eq!(hist.slots(), 64);
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.distinct(), 0);
        assert!(hist.counts().iter().all(|&c| c == 0));
    }

    #[test]
    fn get_is_bounded() {
        let hist = histogram(2, &[15, 15, 0]);
        assert_eq!(hist.get(15), Some(2));
        assert_eq!(hist.get(0), Some(1));
        assert_eq!(hist.get(16), None);
        assert_eq!(hist.get(u64::MAX), None);
    }

    #[test]
    fn get_kmer_checks_length() {
        let hist = histogram(2, &[1]);
        assert_eq!(hist.get_kmer("AC").unwrap(), 1);
        assert_eq!(hist.get_kmer("ac").unwrap(), 1);
        assert!(matches!(
            hist.get_kmer("ACG"),
            Err(KmerCountError::LengthMismatch { left: 2, right: 3 })
        ));
        assert!(matches!(
            hist.get_kmer("AN"),
            Err(KmerCountError::InvalidBase { base: b'N', .. })
        ));
    }

    #[test]
    fn iter_nonzero_in_index_order() {
        let hist = histogram(2, &[11, 1, 6, 1]);
        let seen: Vec<_> = hist.iter_nonzero().collect();
        assert_eq!(seen, vec![(1, 2), (6, 1), (11, 1)]);
    }

    #[test]
    fn merge_adds_counts() {
        let mut left = histogram(2, &[1, 2]);
        let right = histogram(2, &[2, 3]);
        left.merge(&right).unwrap();
        assert_eq!(left.get(1), Some(1));
        assert_eq!(left.get(2), Some(2));
        assert_eq!(left.get(3), Some(1));
        assert_eq!(left.total(), 4);
    }

    #[test]
    fn merge_rejects_different_k() {
        let mut left = histogram(2, &[]);
        let right = histogram(3, &[]);
        assert!(matches!(
            left.merge(&right),
            Err(KmerCountError::LengthMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn oversized_histogram_is_an_error() {
        let k = KmerLength::new(31).unwrap();
        assert!(matches!(
            KmerHistogram::new(k),
            Err(KmerCountError::HistogramTooLarge { k: 31 })
        ));
    }

    #[test]
    fn spectrum_basic() {
        let hist = histogram(2, &[0, 1, 2, 2, 3, 3]);
        let spectrum = hist.spectrum();

        // 2 k-mers appear once
        assert_eq!(spectrum.get(&1), Some(&2));
        // 2 k-mers appear twice
        assert_eq!(spectrum.get(&2), Some(&2));
        // No k-mers appear 3 times
        assert_eq!(spectrum.get(&3), None);
    }

    #[test]
    fn spectrum_empty() {
        let hist = histogram(2, &[]);
        assert!(hist.spectrum().is_empty());
    }

    #[test]
    fn stats_basic() {
        let hist = histogram(2, &[0, 1, 2, 2, 3, 3]);
        let stats = hist.stats();

        assert_eq!(stats.distinct_kmers, 4);
        assert_eq!(stats.total_kmers, 6); // 1+1+2+2
        // Counts 1 and 2 both have frequency 2; either may be the mode.
        assert_eq!(stats.mode_frequency, 2);
        assert!((stats.mean_count - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_empty() {
        let stats = spectrum_stats(&KmerSpectrum::new());

        assert_eq!(stats.distinct_kmers, 0);
        assert_eq!(stats.total_kmers, 0);
        assert_eq!(stats.mode_count, 0);
        assert_eq!(stats.mode_frequency, 0);
        assert!((stats.mean_count - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_single_kmer() {
        let hist = histogram(1, &[2; 42]);
        let stats = hist.stats();

        assert_eq!(stats.distinct_kmers, 1);
        assert_eq!(stats.total_kmers, 42);
        assert_eq!(stats.mode_count, 42);
        assert_eq!(stats.mode_frequency, 1);
        assert!((stats.mean_count - 42.0).abs() < f64::EPSILON);
    }
}
