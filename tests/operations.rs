//! End-to-end tests for the three operations, driving the public API
//! against fixture files in a temp directory and reloading the outputs.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};
use tempfile::TempDir;

use pdfmux::commands;
use pdfmux::status::MemoryStatus;
use pdfmux::Error;

/// Write a minimal text-bearing PDF with `page_count` pages.
fn create_test_pdf(dir: &Path, name: &str, page_count: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter([(
        "Font",
        Object::Dictionary(Dictionary::from_iter([(
            "F1",
            Object::Reference(font_id),
        )])),
    )]));

    let mut kids = Vec::new();
    for n in 1..=page_count {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("{name} page {n}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
        let page_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Reference(resources_id)),
            (
                "MediaBox",
                Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
            ),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages = Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_count as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

fn create_test_image(dir: &Path, name: &str, width: u32, height: u32, format: image::ImageFormat) -> PathBuf {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([200, 100, 50]),
    ));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn page_count(path: &Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

#[test]
fn merge_combines_all_pages_in_order() {
    let dir = TempDir::new().unwrap();
    let a = create_test_pdf(dir.path(), "a.pdf", 2);
    let b = create_test_pdf(dir.path(), "b.pdf", 3);
    let out = dir.path().join("merged.pdf");

    let mut status = MemoryStatus::default();
    commands::merge::run(&[&a, &b], &out, &mut status).unwrap();

    assert_eq!(page_count(&out), 5);
    assert_eq!(status.messages.first().unwrap(), "Merging...");
    assert!(status.messages.last().unwrap().starts_with("Finished:"));
}

#[test]
fn merge_requires_two_inputs() {
    let dir = TempDir::new().unwrap();
    let a = create_test_pdf(dir.path(), "a.pdf", 2);
    let out = dir.path().join("merged.pdf");

    let mut status = MemoryStatus::default();
    let err = commands::merge::run(&[&a], &out, &mut status).unwrap_err();
    assert!(matches!(err, Error::NotEnoughInputs { needed: 2, got: 1 }));
    assert!(!out.exists());
    // Validation happens before any work is reported.
    assert!(status.messages.is_empty());
}

#[test]
fn merge_rejects_non_pdf_input() {
    let dir = TempDir::new().unwrap();
    let a = create_test_pdf(dir.path(), "a.pdf", 1);
    let junk = dir.path().join("junk.pdf");
    fs::write(&junk, b"this is not a pdf").unwrap();
    let out = dir.path().join("merged.pdf");

    let mut status = MemoryStatus::default();
    let err = commands::merge::run(&[&a, &junk], &out, &mut status).unwrap_err();
    assert!(matches!(err, Error::DocumentLoad { .. }));
    assert!(!out.exists());
}

#[test]
fn extract_copies_the_requested_range() {
    let dir = TempDir::new().unwrap();
    let input = create_test_pdf(dir.path(), "doc.pdf", 3);
    let out = dir.path().join("extracted.pdf");

    let mut status = MemoryStatus::default();
    commands::extract::run(&input, "2-3", &out, &mut status).unwrap();

    assert_eq!(page_count(&out), 2);
}

#[test]
fn extract_keeps_duplicates() {
    let dir = TempDir::new().unwrap();
    let input = create_test_pdf(dir.path(), "doc.pdf", 2);
    let out = dir.path().join("extracted.pdf");

    let mut status = MemoryStatus::default();
    commands::extract::run(&input, "1,1,2", &out, &mut status).unwrap();

    assert_eq!(page_count(&out), 3);
}

#[test]
fn extract_rejects_out_of_range_page() {
    let dir = TempDir::new().unwrap();
    let input = create_test_pdf(dir.path(), "doc.pdf", 3);
    let out = dir.path().join("extracted.pdf");

    let mut status = MemoryStatus::default();
    let err = commands::extract::run(&input, "9", &out, &mut status).unwrap_err();
    assert!(matches!(err, Error::PageOutOfRange { page: 9, total: 3 }));
    assert!(!out.exists());
}

#[test]
fn extract_validates_the_expression_before_opening_anything() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist.pdf");
    let out = dir.path().join("extracted.pdf");

    let mut status = MemoryStatus::default();
    let err = commands::extract::run(&missing, "nope", &out, &mut status).unwrap_err();
    // The malformed expression wins over the missing file.
    assert!(matches!(err, Error::InvalidRange { .. }));
    assert!(status.messages.is_empty());
}

#[test]
fn images_build_one_page_per_image_at_pixel_size() {
    let dir = TempDir::new().unwrap();
    let png = create_test_image(dir.path(), "a.png", 4, 6, image::ImageFormat::Png);
    let jpg = create_test_image(dir.path(), "b.jpg", 8, 2, image::ImageFormat::Jpeg);
    let out = dir.path().join("images.pdf");

    let mut status = MemoryStatus::default();
    commands::images::run(&[&png, &jpg], &out, &mut status).unwrap();

    let doc = Document::load(&out).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 2);

    let first = doc.get_dictionary(pages[&1]).unwrap();
    let media_box: Vec<i64> = first
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|value| value.as_i64().unwrap())
        .collect();
    assert_eq!(media_box, vec![0, 0, 4, 6]);
}

#[test]
fn images_reject_unsupported_files() {
    let dir = TempDir::new().unwrap();
    let png = create_test_image(dir.path(), "a.png", 4, 6, image::ImageFormat::Png);
    let text = dir.path().join("notes.txt");
    fs::write(&text, b"not an image").unwrap();
    let out = dir.path().join("images.pdf");

    let mut status = MemoryStatus::default();
    let err = commands::images::run(&[&png, &text], &out, &mut status).unwrap_err();
    assert!(matches!(err, Error::UnsupportedImageType { .. }));
    assert!(!out.exists());
}

#[test]
fn images_require_an_input() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("images.pdf");

    let mut status = MemoryStatus::default();
    let inputs: [&Path; 0] = [];
    let err = commands::images::run(&inputs, &out, &mut status).unwrap_err();
    assert!(matches!(err, Error::NotEnoughInputs { needed: 1, got: 0 }));
}
