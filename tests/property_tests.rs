//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold across all valid inputs,
//! catching edge cases that might be missed by example-based tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use kmer_total::builder::KmerCounter;
use kmer_total::{count_kmers, index_to_kmer, kmer_to_index, KmerLength};
use proptest::prelude::*;

/// Strategy for generating valid DNA sequences.
fn dna_sequence(min_len: usize, max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')],
        min_len..=max_len,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for FASTA-ish text: bases mixed with line breaks, Ns and headers.
fn fasta_text() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(
        prop_oneof![
            8 => prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
            2 => Just(b'\n'),
            1 => Just(b'N'),
            1 => Just(b'\r'),
            1 => Just(b'>'),
        ],
        0..=200,
    )
}

/// Strategy for generating valid k-mer lengths.
fn kmer_length() -> impl Strategy<Value = usize> {
    1usize..=10
}

proptest! {
    /// Decoding an encoded k-mer should give back the original string.
    #[test]
    fn index_roundtrip(seq in dna_sequence(1, 31)) {
        let k = KmerLength::new(seq.len()).unwrap();
        let index = kmer_to_index(&seq).unwrap();

        prop_assert!(index < k.space());
        prop_assert_eq!(index_to_kmer(index, k).unwrap(), seq);
    }

    /// Every index below 4^k decodes to a k-length string over ACGT.
    #[test]
    fn index_decodes_to_k_bases(k in kmer_length(), seed in any::<u64>()) {
        let k = KmerLength::new(k).unwrap();
        let index = seed % k.space();
        let kmer = index_to_kmer(index, k).unwrap();

        prop_assert_eq!(kmer.len(), k.get());
        prop_assert!(kmer.bytes().all(|b| b"ACGT".contains(&b)));
        prop_assert_eq!(kmer_to_index(&kmer).unwrap(), index);
    }

    /// Indices at or above 4^k are rejected.
    #[test]
    fn out_of_range_index_rejected(k in kmer_length(), offset in 0u64..1000) {
        let k = KmerLength::new(k).unwrap();
        prop_assert!(index_to_kmer(k.space() + offset, k).is_err());
    }

    /// Encoding preserves lexicographic order over ACGT.
    #[test]
    fn index_order_matches_string_order(a in dna_sequence(6, 6), b in dna_sequence(6, 6)) {
        let ia = kmer_to_index(&a).unwrap();
        let ib = kmer_to_index(&b).unwrap();
        prop_assert_eq!(ia.cmp(&ib), a.cmp(&b));
    }

    /// A clean sequence of length L has exactly L - k + 1 windows.
    #[test]
    fn clean_sequence_window_count(seq in dna_sequence(1, 300), k in kmer_length()) {
        let fasta = format!(">s\n{seq}\n");
        let histogram = count_kmers(fasta.as_bytes(), k).unwrap();
        let expected = (seq.len() + 1).saturating_sub(k) as u64;

        prop_assert_eq!(histogram.total(), expected);
    }

    /// The chunk size never changes the result.
    #[test]
    fn chunk_size_invariance(
        input in fasta_text(),
        k in 1usize..=6,
        chunk_size in 1usize..=17,
    ) {
        let reference = count_kmers(&input[..], k).unwrap();
        let chunked = KmerCounter::new()
            .k(k)
            .unwrap()
            .chunk_size(chunk_size)
            .count_reader(&input[..])
            .unwrap();

        prop_assert_eq!(chunked, reference);
    }

    /// Line breaks inside a record are transparent.
    #[test]
    fn line_breaks_are_transparent(seq in dna_sequence(1, 120), width in 1usize..=20, k in kmer_length()) {
        let wrapped: Vec<String> = seq
            .as_bytes()
            .chunks(width)
            .map(|line| String::from_utf8(line.to_vec()).unwrap())
            .collect();
        let one_line = format!(">s\n{seq}\n");
        let multi_line = format!(">s\n{}\n", wrapped.join("\n"));

        prop_assert_eq!(
            count_kmers(multi_line.as_bytes(), k).unwrap(),
            count_kmers(one_line.as_bytes(), k).unwrap()
        );
    }

    /// Lowercase bases count as their uppercase forms.
    #[test]
    fn lowercase_equals_uppercase(seq in dna_sequence(1, 100), k in kmer_length()) {
        let upper = count_kmers(seq.as_bytes(), k).unwrap();
        let lower = count_kmers(seq.to_lowercase().as_bytes(), k).unwrap();

        prop_assert_eq!(upper, lower);
    }

    /// Concatenating two records counts each one independently.
    #[test]
    fn records_are_independent(a in dna_sequence(1, 60), b in dna_sequence(1, 60), k in kmer_length()) {
        let both = format!(">a\n{a}\n>b\n{b}\n");
        let mut expected = count_kmers(a.as_bytes(), k).unwrap();
        expected.merge(&count_kmers(b.as_bytes(), k).unwrap()).unwrap();

        prop_assert_eq!(count_kmers(both.as_bytes(), k).unwrap(), expected);
    }
}
