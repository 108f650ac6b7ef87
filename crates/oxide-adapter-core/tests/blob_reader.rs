//! Tests for chunked blob reads against a counting cursor.

mod common;
use common::*;

use oxide_adapter_core::{AdapterError, BlobReader};

#[test]
fn empty_blob_needs_no_chunk_reads() {
    let mut cursor = ChunkCursor::sequential("photo", Vec::new());
    let bytes = BlobReader::default().read_blob(&mut cursor, "photo").unwrap();
    assert!(bytes.is_empty());
    assert_eq!(cursor.chunk_reads, 0);
}

#[test]
fn exact_chunk_needs_one_read() {
    let mut cursor = ChunkCursor::sequential("photo", pattern(100));
    let bytes = BlobReader::default().read_blob(&mut cursor, "photo").unwrap();
    assert_eq!(bytes, pattern(100));
    assert_eq!(cursor.chunk_reads, 1);
}

#[test]
fn partial_last_chunk() {
    let mut cursor = ChunkCursor::sequential("photo", pattern(250));
    let bytes = BlobReader::default().read_blob(&mut cursor, "photo").unwrap();
    assert_eq!(bytes, pattern(250));
    assert_eq!(cursor.chunk_reads, 3);
    assert_eq!(cursor.requested, vec![100, 100, 50]);
}

#[test]
fn configured_chunk_size() {
    let mut cursor = ChunkCursor::sequential("photo", pattern(10_000));
    let bytes = BlobReader::new(4096).read_blob(&mut cursor, "photo").unwrap();
    assert_eq!(bytes.len(), 10_000);
    assert_eq!(cursor.chunk_reads, 3);
}

#[test]
fn column_resolved_by_name() {
    let mut cursor = ChunkCursor::sequential("id", vec![1]);
    cursor.columns.push(("photo".to_string(), pattern(30)));
    let bytes = BlobReader::default().read_blob(&mut cursor, "photo").unwrap();
    assert_eq!(bytes, pattern(30));
}

#[test]
fn random_access_cursor_is_rejected() {
    let mut cursor = ChunkCursor::random("photo", pattern(250));
    let err = BlobReader::default().read_blob(&mut cursor, "photo").unwrap_err();
    assert!(matches!(
        err,
        AdapterError::SequentialAccessRequired { ref column } if column == "photo"
    ));
    assert_eq!(cursor.chunk_reads, 0);
}

#[test]
fn blob_as_ascii_string() {
    let mut cursor = ChunkCursor::sequential("notes", b"hello, world".to_vec());
    let text = BlobReader::new(5)
        .read_string_from_blob(&mut cursor, "notes")
        .unwrap();
    assert_eq!(text, "hello, world");
    assert_eq!(cursor.chunk_reads, 3);
}
