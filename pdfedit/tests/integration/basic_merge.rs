//! Integration tests for merging.

use lopdf::{Document, Object};
use pdfedit::config::WriteOptions;
use pdfedit::io::PdfWriter;
use pdfedit::merge::{Merger, merge_files, merge_pdfs};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{
    LETTER, dir_entries, expected, labels, outline, page_count, write_linked_pdf, write_nested_pdf,
    write_outlined_pdf, write_pdf,
};

#[test]
fn test_merge_two_pdfs_in_order() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 3);
    let b = write_pdf(&dir, "b.pdf", "B", 2);
    let output = dir.path().join("out.pdf");

    assert!(merge_pdfs(&[a, b], &output));
    assert_eq!(labels(&output), vec!["A1", "A2", "A3", "B1", "B2"]);
}

#[test]
fn test_merge_order_follows_input_list() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 1);
    let b = write_pdf(&dir, "b.pdf", "B", 1);
    let c = write_pdf(&dir, "c.pdf", "C", 1);
    let output = dir.path().join("out.pdf");

    assert!(merge_pdfs(&[c, a, b], &output));
    assert_eq!(labels(&output), vec!["C1", "A1", "B1"]);
}

#[rstest]
#[case(&[1, 1])]
#[case(&[4, 7, 2])]
#[case(&[10, 0, 3])]
#[case(&[1, 2, 3, 4, 5])]
fn test_merged_page_count_is_sum(#[case] counts: &[usize]) {
    let dir = TempDir::new().unwrap();
    let inputs: Vec<_> = counts
        .iter()
        .enumerate()
        .map(|(i, &pages)| write_pdf(&dir, &format!("in{i}.pdf"), "P", pages))
        .collect();
    let output = dir.path().join("out.pdf");

    let stats = merge_files(&inputs, &output).unwrap();
    assert_eq!(stats.pages_per_file, counts);
    assert_eq!(stats.total_pages, counts.iter().sum::<usize>());
    assert_eq!(page_count(&output), stats.total_pages);
}

#[test]
fn test_merge_single_input_copies_it() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 4);
    let output = dir.path().join("copy.pdf");

    assert!(merge_pdfs(&[a], &output));
    assert_eq!(labels(&output), expected("A", 1..=4));
}

#[test]
fn test_merge_same_file_twice() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 2);
    let output = dir.path().join("out.pdf");

    assert!(merge_pdfs(&[a.clone(), a], &output));
    assert_eq!(labels(&output), vec!["A1", "A2", "A1", "A2"]);
}

#[test]
fn test_merge_replaces_existing_output() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 1);
    let b = write_pdf(&dir, "b.pdf", "B", 1);
    let output = dir.path().join("out.pdf");
    std::fs::write(&output, b"stale").unwrap();

    assert!(merge_pdfs(&[a, b], &output));
    assert_eq!(page_count(&output), 2);
}

#[test]
fn test_merge_materializes_inherited_attributes() {
    let dir = TempDir::new().unwrap();
    let nested = write_nested_pdf(&dir, "nested.pdf");
    let flat = write_pdf(&dir, "flat.pdf", "F", 1);
    let output = dir.path().join("out.pdf");

    assert!(merge_pdfs(&[nested, flat], &output));
    assert_eq!(labels(&output), vec!["N1", "N2", "N3", "F1"]);

    let doc = Document::load(&output).unwrap();
    let rotations: Vec<Option<i64>> = doc
        .get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_dictionary(id).unwrap();
            assert!(page.get(b"Resources").is_ok());
            let media_box: Vec<i64> = page
                .get(b"MediaBox")
                .and_then(Object::as_array)
                .unwrap()
                .iter()
                .map(|v| v.as_i64().unwrap())
                .collect();
            assert_eq!(media_box, LETTER);
            page.get(b"Rotate").and_then(Object::as_i64).ok()
        })
        .collect();
    assert_eq!(rotations, vec![Some(90), Some(90), None, None]);
}

#[test]
fn test_atomic_merge_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 2);
    let b = write_pdf(&dir, "b.pdf", "B", 2);
    let output = dir.path().join("out.pdf");

    let merger = Merger::with_writer(PdfWriter::atomic());
    let stats = merger.merge(&[a, b], &output).unwrap();
    assert_eq!(stats.total_pages, 4);
    assert_eq!(dir_entries(&dir), vec!["a.pdf", "b.pdf", "out.pdf"]);
}

#[test]
fn test_compressed_merge() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 3);
    let b = write_pdf(&dir, "b.pdf", "B", 3);
    let output = dir.path().join("out.pdf");

    let writer = PdfWriter::with_options(WriteOptions {
        compress: true,
        ..WriteOptions::default()
    });
    let stats = Merger::with_writer(writer).merge(&[a, b], &output).unwrap();

    let write = stats.write.unwrap();
    assert!(write.compressed);
    assert_eq!(write.output_path, output);
    assert_eq!(page_count(&output), 6);
}

fn entry(title: &str, page: &str) -> (String, String) {
    (title.to_string(), page.to_string())
}

#[test]
fn test_merge_keeps_bookmarks_of_each_input() {
    let dir = TempDir::new().unwrap();
    let a = write_outlined_pdf(&dir, "a.pdf", "A", 2);
    let plain = write_pdf(&dir, "plain.pdf", "X", 1);
    let b = write_outlined_pdf(&dir, "b.pdf", "B", 3);
    let output = dir.path().join("out.pdf");

    assert!(merge_pdfs(&[a, plain, b], &output));
    assert_eq!(labels(&output), vec!["A1", "A2", "X1", "B1", "B2", "B3"]);
    assert_eq!(
        outline(&output),
        vec![
            entry("A chapter 1", "A1"),
            entry("A chapter 2", "A2"),
            entry("B chapter 1", "B1"),
            entry("B chapter 2", "B2"),
            entry("B chapter 3", "B3"),
        ]
    );
}

#[test]
fn test_merge_same_outlined_file_twice() {
    let dir = TempDir::new().unwrap();
    let a = write_outlined_pdf(&dir, "a.pdf", "A", 1);
    let output = dir.path().join("out.pdf");

    let stats = merge_files(&[a.clone(), a], &output).unwrap();
    assert_eq!(stats.total_pages, 2);

    let doc = Document::load(&output).unwrap();
    let pages: Vec<_> = doc.get_pages().into_values().collect();
    let entries = outline(&output);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|(title, page)| title == "A chapter 1" && page == "A1"));

    // Each copy points at its own page.
    let root = doc
        .catalog()
        .unwrap()
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .unwrap();
    let first = doc
        .get_dictionary(root)
        .unwrap()
        .get(b"First")
        .and_then(Object::as_reference)
        .unwrap();
    let second = doc
        .get_dictionary(first)
        .unwrap()
        .get(b"Next")
        .and_then(Object::as_reference)
        .unwrap();
    let target = |item: lopdf::ObjectId| {
        doc.get_dictionary(item)
            .unwrap()
            .get(b"Dest")
            .and_then(Object::as_array)
            .unwrap()[0]
            .as_reference()
            .unwrap()
    };
    assert_eq!(vec![target(first), target(second)], pages);
}

#[test]
fn test_merge_without_bookmarks_adds_none() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 2);
    let b = write_linked_pdf(&dir, "b.pdf", "B", 2);
    let output = dir.path().join("out.pdf");

    assert!(merge_pdfs(&[a, b], &output));
    assert!(outline(&output).is_empty());
    let doc = Document::load(&output).unwrap();
    assert!(!doc.catalog().unwrap().has(b"Outlines"));
}
