mod common;

use std::io::Write;

use objmark_core::geometry::Rect;
use objmark_core::io::annotation::{
    align_to_images, append_annotation_line, append_header_line, load_annotation_file,
    save_annotation_file, AnnotationEntry,
};

// ---------------------------------------------------------------------------
// Line format
// ---------------------------------------------------------------------------

#[test]
fn test_to_line_format() {
    let entry = AnnotationEntry::new(
        "rawdata/a.png",
        vec![Rect::new(10, 20, 30, 40), Rect::new(5, 5, 12, 12)],
    );
    assert_eq!(entry.to_line(), "rawdata/a.png 2 10 20 30 40 5 5 12 12");
}

#[test]
fn test_to_line_without_markers() {
    assert_eq!(AnnotationEntry::new("b.jpg", Vec::new()).to_line(), "b.jpg 0");
}

#[test]
fn test_parse_line_reads_markers() {
    let entry = AnnotationEntry::parse_line("a.png 2 1 2 3 4  5 6 7 8\r").unwrap();
    assert_eq!(entry.image, "a.png");
    assert_eq!(entry.rects, vec![Rect::new(1, 2, 3, 4), Rect::new(5, 6, 7, 8)]);
}

#[test]
fn test_parse_line_ignores_extra_values() {
    let entry = AnnotationEntry::parse_line("a.png 1 1 2 3 4 9 9 9 9").unwrap();
    assert_eq!(entry.rects, vec![Rect::new(1, 2, 3, 4)]);
}

#[test]
fn test_parse_line_rejects_bare_name() {
    assert!(AnnotationEntry::parse_line("a.png").is_none());
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let entries = load_annotation_file(&dir.path().join("none.txt")).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ann.txt");
    let entries = vec![
        AnnotationEntry::new("a.png", vec![Rect::new(1, 2, 3, 4)]),
        AnnotationEntry::new("b.png", Vec::new()),
    ];
    save_annotation_file(&path, &entries).unwrap();
    assert_eq!(load_annotation_file(&path).unwrap(), entries);
}

#[test]
fn test_header_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ann.txt");
    append_header_line(&path).unwrap();
    append_annotation_line(&path, &AnnotationEntry::new("a.png", vec![Rect::new(1, 1, 2, 2)]))
        .unwrap();
    append_header_line(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("########################"));
    assert_eq!(common::annotation_lines(&path), vec!["a.png 1 1 1 2 2"]);

    let entries = load_annotation_file(&path).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].rects, vec![Rect::new(1, 1, 2, 2)]);
}

#[test]
fn test_load_tolerates_garbage_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ann.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "a.png 1 x 2 3 4").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "lonely").unwrap();
    drop(file);

    let entries = load_annotation_file(&path).unwrap();
    assert_eq!(entries, vec![AnnotationEntry::new("a.png", vec![Rect::new(0, 2, 3, 4)])]);
}

// ---------------------------------------------------------------------------
// Alignment with the image list
// ---------------------------------------------------------------------------

#[test]
fn test_align_last_entry_wins() {
    let loaded = vec![
        AnnotationEntry::new("a.png", vec![Rect::new(1, 1, 1, 1)]),
        AnnotationEntry::new("b.png", vec![Rect::new(2, 2, 2, 2)]),
        AnnotationEntry::new("a.png", vec![Rect::new(3, 3, 3, 3)]),
    ];
    let images = vec!["a.png".to_string(), "b.png".to_string(), "c.png".to_string()];

    let aligned = align_to_images(&loaded, &images);
    assert_eq!(
        aligned,
        vec![
            vec![Rect::new(3, 3, 3, 3)],
            vec![Rect::new(2, 2, 2, 2)],
            Vec::new(),
        ]
    );
}

#[test]
fn test_align_drops_unknown_images() {
    let loaded = vec![AnnotationEntry::new("gone.png", vec![Rect::new(1, 1, 1, 1)])];
    let aligned = align_to_images(&loaded, &["a.png".to_string()]);
    assert_eq!(aligned, vec![Vec::<Rect>::new()]);
}
