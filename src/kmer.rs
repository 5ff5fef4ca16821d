//! K-mer lengths and conversion between k-mer strings and their indices.
//!
//! A k-mer index is the base-4 number formed by the codes of its bases, most
//! significant base first (A=0, C=1, G=2, T=3). For a fixed `k` this is a
//! bijection between `{A,C,G,T}^k` and `[0, 4^k)`.
//!
//! ```rust
//! use kmer_total::kmer::{index_to_kmer, kmer_to_index, KmerLength};
//!
//! let k = KmerLength::new(4)?;
//! let index = kmer_to_index("GATC")?;
//! assert_eq!(index, 0b10_00_11_01);
//! assert_eq!(index_to_kmer(index, k)?, "GATC");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{
    alphabet::{base_letter, DNA},
    error::{InvalidBaseError, KmerCountError, KmerLengthError},
};

/// Minimum valid k-mer length.
pub const MIN_K: usize = 1;

/// Maximum valid k-mer length.
///
/// `4^31 = 2^62` keeps both every index and the size of the index space
/// itself representable in a `u64`.
pub const MAX_K: usize = 31;

/// A validated k-mer length in `MIN_K..=MAX_K`.
///
/// # Example
///
/// ```rust
/// use kmer_total::kmer::KmerLength;
///
/// let k = KmerLength::new(21)?;
/// assert_eq!(k.get(), 21);
/// assert_eq!(k.space(), 1 << 42);
///
/// assert!(KmerLength::new(0).is_err());
/// assert!(KmerLength::new(32).is_err());
/// # Ok::<(), kmer_total::error::KmerLengthError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KmerLength(usize);

impl KmerLength {
    /// Creates a validated k-mer length.
    pub const fn new(k: usize) -> Result<Self, KmerLengthError> {
        if k < MIN_K || k > MAX_K {
            return Err(KmerLengthError {
                k,
                min: MIN_K as u8,
                max: MAX_K as u8,
            });
        }
        Ok(Self(k))
    }

    /// Returns the raw length.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Number of distinct k-mers of this length, `4^k`.
    #[inline]
    pub const fn space(self) -> u64 {
        1 << (2 * self.0)
    }
}

impl TryFrom<usize> for KmerLength {
    type Error = KmerLengthError;

    fn try_from(k: usize) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

impl std::fmt::Display for KmerLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Computes the index of a k-mer string.
///
/// Upper- and lowercase bases are accepted. The length of `kmer` is its `k`.
///
/// # Errors
///
/// Returns [`KmerCountError::InvalidBase`] for the first byte that is not a
/// base, and [`KmerCountError::InvalidKmerLength`] if `kmer` is empty or
/// longer than [`MAX_K`].
pub fn kmer_to_index<S: AsRef<[u8]>>(kmer: S) -> Result<u64, KmerCountError> {
    let kmer = kmer.as_ref();
    KmerLength::new(kmer.len())?;
    Ok(encode_bases(kmer)?)
}

/// Encodes `bases` as a base-4 number, reporting the first non-base byte.
pub(crate) fn encode_bases(bases: &[u8]) -> Result<u64, InvalidBaseError> {
    bases
        .iter()
        .enumerate()
        .try_fold(0u64, |index, (position, &base)| match DNA.code(base) {
            Some(code) => Ok((index << 2) | u64::from(code)),
            None => Err(InvalidBaseError { base, position }),
        })
}

/// Renders an index as its k-mer string.
///
/// Indices that need fewer than `k` base-4 digits are left-padded with `A`.
///
/// # Errors
///
/// Returns [`KmerCountError::IndexOutOfRange`] if `index >= 4^k`.
pub fn index_to_kmer(index: u64, k: KmerLength) -> Result<String, KmerCountError> {
    let bytes = index_to_bytes(index, k)?;
    Ok(bytes.into_iter().map(char::from).collect())
}

/// Renders an index as uppercase k-mer bytes.
///
/// # Errors
///
/// Returns [`KmerCountError::IndexOutOfRange`] if `index >= 4^k`.
pub fn index_to_bytes(index: u64, k: KmerLength) -> Result<Vec<u8>, KmerCountError> {
    if index >= k.space() {
        return Err(KmerCountError::IndexOutOfRange { index, k: k.get() });
    }

    let mut rest = index;
    let mut bytes = Vec::with_capacity(k.get());
    for _ in 0..k.get() {
        bytes.push(base_letter((rest & 0b11) as u8));
        rest >>= 2;
    }
    // Least significant base was extracted first.
    bytes.reverse();
    Ok(bytes)
}
