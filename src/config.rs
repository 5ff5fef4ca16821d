//! Run configuration.

use crate::{
    error::{KmerCountError, KmerLengthError},
    kmer::KmerLength,
};

/// Default number of bytes requested from the input per read.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Settings for one counting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    k: KmerLength,
    chunk_size: usize,
}

impl ScanConfig {
    /// Creates a configuration with the default chunk size.
    pub const fn new(k: KmerLength) -> Self {
        Self {
            k,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Validates a raw `k` and creates a configuration from it.
    pub fn from_k(k: usize) -> Result<Self, KmerLengthError> {
        Ok(Self::new(KmerLength::new(k)?))
    }

    /// Sets the number of bytes requested per read.
    ///
    /// Any size of at least one byte yields the same histogram; larger chunks
    /// only mean fewer reads.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self, KmerCountError> {
        if chunk_size == 0 {
            return Err(KmerCountError::InvalidChunkSize { size: chunk_size });
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    pub const fn k(&self) -> KmerLength {
        self.k
    }

    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}
