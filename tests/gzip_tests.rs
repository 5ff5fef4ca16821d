//! Tests for gzip compressed input support.

#![cfg(feature = "gzip")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use flate2::write::GzEncoder;
use flate2::Compression;
use kmer_total::builder::KmerCounter;
use kmer_total::run::{count_kmers_files, count_path};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{Builder, NamedTempFile};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Writes a gzip-compressed copy of a fixture to a temp file ending in `.gz`.
fn gzipped_fixture(name: &str) -> NamedTempFile {
    let plain = fs::read(fixture_path(name)).expect("fixture should exist");
    let mut file = Builder::new()
        .suffix(".fa.gz")
        .tempfile()
        .expect("should create temp file");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&plain).unwrap();
    file.write_all(&encoder.finish().unwrap()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn count_kmers_from_gzip_file() {
    let gz = gzipped_fixture("simple.fa");
    let histogram = count_path(gz.path(), 4).expect("should count k-mers from gzipped file");

    assert!(histogram.total() > 0, "should find k-mers in gzipped file");
}

#[test]
fn gzip_and_plain_produce_same_results() {
    for name in ["simple.fa", "with_n.fa", "multiline.fa"] {
        let gz = gzipped_fixture(name);

        let plain = count_path(fixture_path(name), 3).expect("should count plain file");
        let gzip = count_path(gz.path(), 3).expect("should count gzipped file");

        assert_eq!(plain, gzip, "{name} should count the same compressed");
    }
}

#[test]
fn gzip_with_small_chunks() {
    let gz = gzipped_fixture("multiline.fa");
    let reference = count_path(fixture_path("multiline.fa"), 5).unwrap();

    let histogram = KmerCounter::new()
        .k(5)
        .unwrap()
        .chunk_size(3)
        .count(gz.path())
        .expect("should count gzipped file");

    assert_eq!(histogram, reference);
}

#[test]
fn mixed_plain_and_gzip_inputs() {
    let gz = gzipped_fixture("simple.fa");
    let plain = fixture_path("simple.fa");

    let merged = count_kmers_files(&[plain.clone(), gz.path().to_path_buf()], 3).unwrap();
    let single = count_path(&plain, 3).unwrap();

    assert_eq!(merged.total(), 2 * single.total());
    assert_eq!(
        merged.get_kmer("ACG").unwrap(),
        2 * single.get_kmer("ACG").unwrap()
    );
}
