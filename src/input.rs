//! Where FASTA bytes come from.
//!
//! Counting works on any [`Read`]; this module turns a command-line path into
//! one. `-` means standard input, so the binary fits into shell pipelines.
//!
//! ```rust
//! use kmer_total::input::Input;
//! use std::path::Path;
//!
//! assert_eq!(Input::from_path(Path::new("-")), Input::Stdin);
//! assert!(matches!(Input::from_path(Path::new("chr1.fa")), Input::File(_)));
//! ```

use std::{
    fmt,
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use crate::error::KmerCountError;

/// A FASTA source: a file on disk or standard input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input {
    File(PathBuf),
    #[default]
    Stdin,
}

impl Input {
    /// Maps `-` to [`Input::Stdin`] and anything else to a file.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Opens the source for reading.
    ///
    /// With the `gzip` feature, files whose name ends in `.gz` are
    /// decompressed on the fly, including multi-member archives.
    ///
    /// # Errors
    ///
    /// Returns [`KmerCountError::InputOpen`] naming the path if the file
    /// cannot be opened.
    pub fn open(&self) -> Result<Box<dyn Read + Send>, KmerCountError> {
        match self {
            Self::Stdin => Ok(Box::new(io::stdin())),
            Self::File(path) => {
                let file = File::open(path).map_err(|source| KmerCountError::InputOpen {
                    source,
                    path: path.clone(),
                })?;
                Ok(reader_for(path, file))
            }
        }
    }
}

#[cfg(feature = "gzip")]
fn reader_for(path: &Path, file: File) -> Box<dyn Read + Send> {
    use flate2::read::MultiGzDecoder;

    if has_gz_extension(path) {
        Box::new(MultiGzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    }
}

#[cfg(not(feature = "gzip"))]
fn reader_for(_path: &Path, file: File) -> Box<dyn Read + Send> {
    Box::new(BufReader::new(file))
}

#[cfg(feature = "gzip")]
fn has_gz_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => f.write_str("<stdin>"),
        }
    }
}
