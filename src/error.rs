//! Error types for kmer-total.
//!
//! This module provides exhaustive, strongly-typed errors for all operations
//! in the library, enabling precise error handling and informative messages.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in kmer-total operations.
#[derive(Debug, Error)]
pub enum KmerCountError {
    /// K-mer length is outside the valid range.
    #[error("invalid k-mer length {k}: must be between {min} and {max}")]
    InvalidKmerLength { k: usize, min: u8, max: u8 },

    /// Read chunk size must hold at least one byte.
    #[error("invalid chunk size {size}: must be at least 1 byte")]
    InvalidChunkSize { size: usize },

    /// The dense histogram for this k cannot be allocated.
    #[error("cannot allocate a histogram of 4^{k} slots")]
    HistogramTooLarge { k: usize },

    /// Encountered a byte that is not A, C, G or T.
    #[error("invalid base 0x{base:02x} at position {position}")]
    InvalidBase { base: u8, position: usize },

    /// A k-mer index does not fit in `[0, 4^k)`.
    #[error("k-mer index {index} is out of range for k = {k}")]
    IndexOutOfRange { index: u64, k: usize },

    /// Two k-mer lengths that must agree do not.
    #[error("k-mer length mismatch: expected {left}, got {right}")]
    LengthMismatch { left: usize, right: usize },

    /// The underlying stream failed while reading.
    #[error("failed to read sequence stream: {source}")]
    StreamRead {
        #[source]
        source: std::io::Error,
    },

    /// Failed to open an input file.
    #[error("failed to open input '{path}': {source}")]
    InputOpen {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to write output.
    #[error("failed to write output: {source}")]
    WriteError {
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },
}

/// Error for invalid k-mer length.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("k-mer length {k} is out of range: must be between {min} and {max}")]
pub struct KmerLengthError {
    /// The invalid k value that was provided.
    pub k: usize,
    /// Minimum valid k-mer length.
    pub min: u8,
    /// Maximum valid k-mer length.
    pub max: u8,
}

/// Error for invalid DNA base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidBaseError {
    /// The invalid byte value.
    pub base: u8,
    /// Position of the invalid byte in the k-mer.
    pub position: usize,
}

impl std::fmt::Display for InvalidBaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.base.is_ascii_graphic() || self.base == b' ' {
            write!(
                f,
                "invalid base '{}' (0x{:02x}) at position {}",
                self.base as char, self.base, self.position
            )
        } else {
            write!(
                f,
                "invalid base 0x{:02x} at position {}",
                self.base, self.position
            )
        }
    }
}

impl std::error::Error for InvalidBaseError {}

impl From<serde_json::Error> for KmerCountError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonError { source }
    }
}

impl From<KmerLengthError> for KmerCountError {
    fn from(err: KmerLengthError) -> Self {
        Self::InvalidKmerLength {
            k: err.k,
            min: err.min,
            max: err.max,
        }
    }
}

impl From<InvalidBaseError> for KmerCountError {
    fn from(err: InvalidBaseError) -> Self {
        Self::InvalidBase {
            base: err.base,
            position: err.position,
        }
    }
}

/// Errors that can occur when using the builder API.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// K-mer length was not set before calling a counting method.
    #[error("k-mer length not set; call .k() first")]
    KmerLengthNotSet,

    /// Invalid k-mer length provided.
    #[error(transparent)]
    KmerLength(#[from] KmerLengthError),

    /// Error opening, reading or writing during a counting run.
    #[error(transparent)]
    Count(#[from] KmerCountError),
}
