//! Integration tests for splitting.

use lopdf::{Document, Object};
use pdfedit::config::SplitConfig;
use pdfedit::range::parse_ranges;
use pdfedit::split::{Splitter, split_file, split_pdf};
use std::path::Path;
use tempfile::TempDir;

use crate::common::{
    dir_entries, expected, labels, page_count, text_streams, write_chained_pdf, write_linked_pdf,
    write_nested_pdf, write_pdf,
};

#[test]
fn test_split_first_and_rest() {
    let dir = TempDir::new().unwrap();
    let doc = write_pdf(&dir, "doc.pdf", "P", 10);
    let ranges = parse_ranges("1-5,6-end").unwrap();

    assert!(split_pdf(&doc, &ranges, &dir.path().join("doc")));
    assert_eq!(labels(&dir.path().join("doc_1.pdf")), expected("P", 1..=5));
    assert_eq!(labels(&dir.path().join("doc_2.pdf")), expected("P", 6..=10));
}

#[test]
fn test_whole_document_range() {
    let dir = TempDir::new().unwrap();
    let doc = write_pdf(&dir, "doc.pdf", "P", 7);

    let stats = split_file(&doc, &parse_ranges("1-end").unwrap(), &dir.path().join("all")).unwrap();
    assert_eq!(stats.outputs.len(), 1);
    assert_eq!(labels(&dir.path().join("all_1.pdf")), expected("P", 1..=7));
}

#[test]
fn test_reversed_range_gives_empty_document() {
    let dir = TempDir::new().unwrap();
    let doc = write_pdf(&dir, "doc.pdf", "P", 10);

    assert!(split_pdf(&doc, &parse_ranges("5-3").unwrap(), &dir.path().join("doc")));
    assert_eq!(page_count(&dir.path().join("doc_1.pdf")), 0);
}

#[test]
fn test_outputs_follow_range_order() {
    let dir = TempDir::new().unwrap();
    let doc = write_pdf(&dir, "doc.pdf", "P", 9);

    assert!(split_pdf(&doc, &parse_ranges("8-9,1-2").unwrap(), &dir.path().join("doc")));
    assert_eq!(labels(&dir.path().join("doc_1.pdf")), vec!["P8", "P9"]);
    assert_eq!(labels(&dir.path().join("doc_2.pdf")), vec!["P1", "P2"]);
}

#[test]
fn test_overlapping_ranges_each_get_their_pages() {
    let dir = TempDir::new().unwrap();
    let doc = write_pdf(&dir, "doc.pdf", "P", 5);

    assert!(split_pdf(&doc, &parse_ranges("1-3,2-4").unwrap(), &dir.path().join("doc")));
    assert_eq!(labels(&dir.path().join("doc_1.pdf")), vec!["P1", "P2", "P3"]);
    assert_eq!(labels(&dir.path().join("doc_2.pdf")), vec!["P2", "P3", "P4"]);
}

#[test]
fn test_ranges_past_the_end_are_clipped() {
    let dir = TempDir::new().unwrap();
    let doc = write_pdf(&dir, "doc.pdf", "P", 4);

    let stats = split_file(
        &doc,
        &parse_ranges("3-99,20-30").unwrap(),
        &dir.path().join("doc"),
    )
    .unwrap();
    assert_eq!(stats.outputs[0].page_count, 2);
    assert_eq!(stats.outputs[1].page_count, 0);
    assert_eq!(labels(&dir.path().join("doc_1.pdf")), vec!["P3", "P4"]);
    assert_eq!(page_count(&dir.path().join("doc_2.pdf")), 0);
}

#[test]
fn test_split_output_holds_only_selected_pages() {
    let dir = TempDir::new().unwrap();
    let doc = write_pdf(&dir, "doc.pdf", "P", 20);

    assert!(split_pdf(&doc, &parse_ranges("4-4").unwrap(), &dir.path().join("one")));

    let drawn = text_streams(&dir.path().join("one_1.pdf"));
    assert_eq!(drawn.len(), 1);
    assert!(drawn[0].contains("(P4)"));
}

/// Destination page of the link annotation on each page of `path`.
fn link_destinations(path: &Path) -> Vec<Object> {
    let output = Document::load(path).unwrap();
    output
        .get_pages()
        .into_values()
        .map(|page_id| {
            let annots = output
                .get_dictionary(page_id)
                .unwrap()
                .get(b"Annots")
                .and_then(Object::as_array)
                .unwrap();
            let link = output
                .get_dictionary(annots[0].as_reference().unwrap())
                .unwrap();
            assert_eq!(link.get(b"P").and_then(Object::as_reference).unwrap(), page_id);
            link.get(b"Dest").and_then(Object::as_array).unwrap()[0].clone()
        })
        .collect()
}

#[test]
fn test_split_links_do_not_pull_in_other_pages() {
    let dir = TempDir::new().unwrap();
    let doc = write_linked_pdf(&dir, "linked.pdf", "L", 6);

    assert!(split_pdf(&doc, &parse_ranges("1-1,3-4").unwrap(), &dir.path().join("part")));

    let first = dir.path().join("part_1.pdf");
    let drawn = text_streams(&first);
    assert_eq!(drawn.len(), 1);
    assert!(drawn[0].contains("(L1)"));
    assert_eq!(link_destinations(&first), vec![Object::Null]);

    let second = dir.path().join("part_2.pdf");
    assert_eq!(labels(&second), vec!["L3", "L4"]);
    assert_eq!(text_streams(&second).len(), 2);
    let output = Document::load(&second).unwrap();
    let pages: Vec<_> = output.get_pages().into_values().collect();
    assert_eq!(
        link_destinations(&second),
        vec![Object::Reference(pages[1]), Object::Null]
    );
}

#[test]
fn test_split_page_with_long_reference_chain() {
    let dir = TempDir::new().unwrap();
    let doc = write_chained_pdf(&dir, "chained.pdf", 2, 50_000);

    assert!(split_pdf(&doc, &parse_ranges("1-1,2-2").unwrap(), &dir.path().join("part")));
    assert_eq!(labels(&dir.path().join("part_1.pdf")), vec!["C1"]);
    assert_eq!(labels(&dir.path().join("part_2.pdf")), vec!["C2"]);

    let first = Document::load(dir.path().join("part_1.pdf")).unwrap();
    assert!(first.objects.len() > 50_000);
}

#[test]
fn test_split_nested_tree_keeps_inherited_attributes() {
    let dir = TempDir::new().unwrap();
    let doc = write_nested_pdf(&dir, "nested.pdf");

    assert!(split_pdf(&doc, &parse_ranges("2-3").unwrap(), &dir.path().join("part")));

    let path = dir.path().join("part_1.pdf");
    assert_eq!(labels(&path), vec!["N2", "N3"]);

    let output = Document::load(&path).unwrap();
    let pages: Vec<_> = output.get_pages().into_values().collect();
    let second = output.get_dictionary(pages[0]).unwrap();
    let third = output.get_dictionary(pages[1]).unwrap();
    assert_eq!(second.get(b"Rotate").and_then(Object::as_i64).unwrap(), 90);
    assert!(third.get(b"Rotate").is_err());
    assert!(third.get(b"MediaBox").is_ok());
}

#[test]
fn test_split_with_config_defaults() {
    let dir = TempDir::new().unwrap();
    let doc = write_pdf(&dir, "report.pdf", "R", 3);

    let config = SplitConfig::new(&doc, "1-1,2-end").unwrap();
    config.validate().unwrap();
    let prefix = config.output_prefix().unwrap();

    Splitter::new().split(&config.input, &config.ranges, &prefix).unwrap();
    assert_eq!(
        dir_entries(&dir),
        vec!["report.pdf", "report_1.pdf", "report_2.pdf"]
    );
    assert_eq!(labels(&dir.path().join("report_2.pdf")), vec!["R2", "R3"]);
}
