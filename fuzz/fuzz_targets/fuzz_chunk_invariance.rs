//! Fuzz target for chunked scanning.
//!
//! The first two bytes pick k and the chunk size; the rest is scanned as
//! FASTA. The histogram must not depend on the chunk size.

#![no_main]

use kmer_total::builder::KmerCounter;
use kmer_total::count_kmers;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let [k, chunk, input @ ..] = data else {
        return;
    };
    let k = usize::from(*k % 6) + 1;
    let chunk_size = usize::from(*chunk % 32) + 1;

    let reference = count_kmers(input, k).expect("valid k");
    let chunked = KmerCounter::new()
        .k(k)
        .expect("valid k")
        .chunk_size(chunk_size)
        .count_reader(input)
        .expect("valid settings");

    assert_eq!(chunked, reference, "chunk size {chunk_size} changed counts");
});
