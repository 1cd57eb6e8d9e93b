//! In-memory PDFs with outlines, for tests.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::{Path, PathBuf};

pub enum Target {
    /// `/Dest [page /Fit]`
    Page(u32),
    /// `/Dest (name)` resolved through the catalog name tree
    Named(&'static str, u32),
    /// `/A << /S /GoTo /D [page /Fit] >>`
    GoTo(u32),
    /// a named destination that exists nowhere
    Dangling,
}

pub struct Bookmark {
    pub title: &'static str,
    pub target: Target,
    pub children: Vec<Bookmark>,
}

impl Bookmark {
    pub fn page(title: &'static str, page: u32) -> Self {
        Bookmark {
            title,
            target: Target::Page(page),
            children: Vec::new(),
        }
    }

    pub fn named(title: &'static str, name: &'static str, page: u32) -> Self {
        Bookmark {
            title,
            target: Target::Named(name, page),
            children: Vec::new(),
        }
    }

    pub fn goto(title: &'static str, page: u32) -> Self {
        Bookmark {
            title,
            target: Target::GoTo(page),
            children: Vec::new(),
        }
    }

    pub fn dangling(title: &'static str) -> Self {
        Bookmark {
            title,
            target: Target::Dangling,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Bookmark>) -> Self {
        self.children = children;
        self
    }
}

fn text(s: &str) -> Object {
    Object::String(s.as_bytes().to_vec(), StringFormat::Literal)
}

fn fit(page_id: ObjectId) -> Object {
    Object::Array(vec![Object::Reference(page_id), Object::Name(b"Fit".to_vec())])
}

/// Build a document with `num_pages` pages, each drawing "Page N", and the
/// given top-level bookmarks.
pub fn build_document(num_pages: u32, bookmarks: &[Bookmark]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new("Tj", vec![text(&format!("Page {}", i + 1))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().unwrap(),
        ));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);

    if !bookmarks.is_empty() {
        let mut names = Vec::new();
        let outlines_id = doc.new_object_id();
        let (first, last) = add_items(&mut doc, outlines_id, bookmarks, &page_ids, &mut names);
        let outlines = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Outlines".to_vec())),
            ("First", Object::Reference(first)),
            ("Last", Object::Reference(last)),
            ("Count", Object::Integer(bookmarks.len() as i64)),
        ]);
        doc.objects.insert(outlines_id, Object::Dictionary(outlines));
        catalog.set("Outlines", Object::Reference(outlines_id));

        if !names.is_empty() {
            let dests_id = doc.add_object(Dictionary::from_iter(vec![(
                "Names",
                Object::Array(names),
            )]));
            let names_id = doc.add_object(Dictionary::from_iter(vec![(
                "Dests",
                Object::Reference(dests_id),
            )]));
            catalog.set("Names", Object::Reference(names_id));
        }
    }

    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
}

fn add_items(
    doc: &mut Document,
    parent: ObjectId,
    items: &[Bookmark],
    page_ids: &[ObjectId],
    names: &mut Vec<Object>,
) -> (ObjectId, ObjectId) {
    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();

    for (i, item) in items.iter().enumerate() {
        let mut dict = Dictionary::from_iter(vec![
            ("Title", text(item.title)),
            ("Parent", Object::Reference(parent)),
        ]);

        match item.target {
            Target::Page(page) => dict.set("Dest", fit(page_ids[page as usize])),
            Target::Named(name, page) => {
                names.push(text(name));
                names.push(fit(page_ids[page as usize]));
                dict.set("Dest", text(name));
            }
            Target::GoTo(page) => {
                let action = Dictionary::from_iter(vec![
                    ("S", Object::Name(b"GoTo".to_vec())),
                    ("D", fit(page_ids[page as usize])),
                ]);
                dict.set("A", Object::Dictionary(action));
            }
            Target::Dangling => dict.set("Dest", text("no-such-destination")),
        }

        if i > 0 {
            dict.set("Prev", Object::Reference(ids[i - 1]));
        }
        if i + 1 < ids.len() {
            dict.set("Next", Object::Reference(ids[i + 1]));
        }
        if !item.children.is_empty() {
            let (first, last) = add_items(doc, ids[i], &item.children, page_ids, names);
            dict.set("First", Object::Reference(first));
            dict.set("Last", Object::Reference(last));
            dict.set("Count", Object::Integer(item.children.len() as i64));
        }

        doc.objects.insert(ids[i], Object::Dictionary(dict));
    }

    (ids[0], ids[ids.len() - 1])
}

pub fn build_pdf(num_pages: u32, bookmarks: &[Bookmark]) -> Vec<u8> {
    let mut buffer = Vec::new();
    build_document(num_pages, bookmarks)
        .save_to(&mut buffer)
        .unwrap();
    buffer
}

pub fn write_fixture(dir: &Path, name: &str, num_pages: u32, bookmarks: &[Bookmark]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(num_pages, bookmarks)).unwrap();
    path
}

pub fn write_document(dir: &Path, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// Point the trailer at a standard security handler dictionary. The
/// dictionary has no password hashes, so nothing can be decrypted.
pub fn mark_encrypted(doc: &mut Document) {
    let encrypt_id = doc.add_object(Dictionary::from_iter(vec![
        ("Filter", Object::Name(b"Standard".to_vec())),
        ("V", Object::Integer(1)),
        ("R", Object::Integer(2)),
        ("P", Object::Integer(-4)),
    ]));
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));
}

/// Decoded content stream of every page, in page order.
pub fn page_contents(doc: &Document) -> Vec<Vec<u8>> {
    doc.get_pages()
        .values()
        .map(|id| doc.get_page_content(*id).unwrap())
        .collect()
}

/// The three-chapter book used across the pipeline tests: 20 pages with
/// bookmarks Intro@0, Ch1@5, Ch2@12.
pub fn three_chapter_book() -> Vec<Bookmark> {
    vec![
        Bookmark::page("Intro", 0),
        Bookmark::page("Ch1", 5),
        Bookmark::page("Ch2", 12),
    ]
}
