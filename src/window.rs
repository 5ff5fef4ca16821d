//! Sliding-window index calculation.
//!
//! A window starts at a byte offset and collects `k` bases. Whitespace inside
//! the span is skipped without using up a slot, so a window may stretch over
//! line breaks. Any other non-base byte ends the window early.

use crate::{
    alphabet::{Alphabet, ByteClass},
    kmer::KmerLength,
};

/// Result of evaluating one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// `k` bases were collected; `index` is their k-mer index.
    Valid { index: u64 },
    /// The byte at offset `at` is invalid or a separator. Every later window
    /// that starts before `at` reaches it too, so the caller can jump to `at`.
    Invalid { at: usize },
    /// The bytes ran out before `k` bases were collected.
    Starved,
}

/// Computes window indices for a fixed `k` against an alphabet.
#[derive(Debug, Clone, Copy)]
pub struct WindowCalculator<'a> {
    alphabet: &'a Alphabet,
    k: KmerLength,
}

impl<'a> WindowCalculator<'a> {
    pub const fn new(alphabet: &'a Alphabet, k: KmerLength) -> Self {
        Self { alphabet, k }
    }

    pub const fn k(&self) -> KmerLength {
        self.k
    }

    /// Evaluates the window beginning at `start`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kmer_total::{alphabet::DNA, kmer::KmerLength, window::{Window, WindowCalculator}};
    ///
    /// let calc = WindowCalculator::new(&DNA, KmerLength::new(3)?);
    /// assert_eq!(calc.compute(b"AC\nGT", 0), Window::Valid { index: 0b00_01_10 });
    /// assert_eq!(calc.compute(b"ACNGT", 0), Window::Invalid { at: 2 });
    /// assert_eq!(calc.compute(b"AC\n", 0), Window::Starved);
    /// # Ok::<(), kmer_total::error::KmerLengthError>(())
    /// ```
    pub fn compute(&self, bytes: &[u8], start: usize) -> Window {
        let k = self.k.get();
        let mut index = 0u64;
        let mut taken = 0;

        for (offset, &byte) in bytes.iter().enumerate().skip(start) {
            match self.alphabet.classify(byte) {
                ByteClass::Base(code) => {
                    index = (index << 2) | u64::from(code);
                    taken += 1;
                    if taken == k {
                        return Window::Valid { index };
                    }
                }
                ByteClass::Whitespace => {}
                ByteClass::Separator | ByteClass::Invalid => {
                    return Window::Invalid { at: offset };
                }
            }
        }

        Window::Starved
    }
}
