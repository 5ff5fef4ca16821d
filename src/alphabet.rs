//! Nucleotide alphabet codec.
//!
//! Every byte of FASTA input falls into exactly one [`ByteClass`]. The
//! mapping is a 256-entry table built at compile time, so classification is a
//! single indexed load and the table can be shared freely between runs.
//!
//! ```rust
//! use kmer_total::alphabet::{classify, ByteClass};
//!
//! assert_eq!(classify(b'G'), ByteClass::Base(2));
//! assert_eq!(classify(b'\n'), ByteClass::Whitespace);
//! assert_eq!(classify(b'>'), ByteClass::Separator);
//! assert_eq!(classify(b'N'), ByteClass::Invalid);
//! ```

/// Byte that opens a FASTA header record.
pub const SEPARATOR: u8 = b'>';

/// Bases in code order: `BASES[code]` is the letter for a base code.
pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Classification of a single input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteClass {
    /// A nucleotide with its base code (A=0, C=1, G=2, T=3).
    Base(u8),
    /// Skipped without breaking an otherwise contiguous window.
    Whitespace,
    /// Start of a header record (`>`).
    Separator,
    /// Anything else, including ambiguity codes such as `N`.
    Invalid,
}

/// A total, immutable byte classification table.
#[derive(Debug, Clone)]
pub struct Alphabet {
    table: [ByteClass; 256],
}

impl Alphabet {
    /// The DNA alphabet: `ACGT` in either case, with `\n`, `\r`, space and
    /// tab as whitespace.
    pub const fn dna() -> Self {
        let mut table = [ByteClass::Invalid; 256];
        let mut code = 0;
        while code < BASES.len() {
            let upper = BASES[code];
            table[upper as usize] = ByteClass::Base(code as u8);
            table[upper.to_ascii_lowercase() as usize] = ByteClass::Base(code as u8);
            code += 1;
        }
        table[b'\n' as usize] = ByteClass::Whitespace;
        table[b'\r' as usize] = ByteClass::Whitespace;
        table[b' ' as usize] = ByteClass::Whitespace;
        table[b'\t' as usize] = ByteClass::Whitespace;
        table[SEPARATOR as usize] = ByteClass::Separator;
        Self { table }
    }

    /// Classifies one byte.
    #[inline]
    pub const fn classify(&self, byte: u8) -> ByteClass {
        self.table[byte as usize]
    }

    /// Returns the base code of `byte`, or `None` if it is not a base.
    #[inline]
    pub const fn code(&self, byte: u8) -> Option<u8> {
        match self.classify(byte) {
            ByteClass::Base(code) => Some(code),
            _ => None,
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        DNA.clone()
    }
}

/// The process-wide DNA table.
pub static DNA: Alphabet = Alphabet::dna();

/// Classifies `byte` against the [`DNA`] table.
#[inline]
pub fn classify(byte: u8) -> ByteClass {
    DNA.classify(byte)
}

/// Maps a base code back to its uppercase letter.
///
/// Only the low two bits are used, so any `u8` maps to a letter.
#[inline]
pub const fn base_letter(code: u8) -> u8 {
    BASES[(code & 0b11) as usize]
}
