//! Fuzz target for k-mer index encoding.
//!
//! Any byte string either fails to encode or decodes back to its uppercase
//! form.

#![no_main]

use kmer_total::{index_to_kmer, kmer_to_index, KmerLength};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(index) = kmer_to_index(data) else {
        return;
    };

    let k = KmerLength::new(data.len()).expect("encoded k-mer has a valid length");
    assert!(index < k.space(), "index out of range for k = {k}");

    let decoded = index_to_kmer(index, k).expect("index in range");
    let normalized: Vec<u8> = data.iter().map(u8::to_ascii_uppercase).collect();

    assert_eq!(
        decoded.as_bytes(),
        normalized.as_slice(),
        "index roundtrip failed"
    );
});
