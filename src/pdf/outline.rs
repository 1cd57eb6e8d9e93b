use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Indirection depth after which a destination is treated as unresolvable.
const MAX_DEST_DEPTH: usize = 8;

/// A top-level bookmark and the zero-based page it points at, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub title: String,
    pub page: Option<u32>,
}

/// Read the top-level outline entries in declared order.
///
/// Children are not visited. A document without an outline yields an empty
/// list.
pub fn read_outline(doc: &Document) -> Vec<OutlineEntry> {
    let catalog = match doc.catalog() {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to get document catalog: {}", e);
            return Vec::new();
        }
    };

    let outlines = match catalog.get(b"Outlines").ok().and_then(|o| as_dict(doc, o)) {
        Some(d) => d,
        None => return Vec::new(),
    };

    let first_ref = match outlines.get(b"First") {
        Ok(Object::Reference(r)) => *r,
        _ => return Vec::new(),
    };

    let page_map = build_page_map(doc);
    let mut entries = Vec::new();
    let mut visited = HashSet::new();
    let mut current_id = Some(first_ref);

    while let Some(id) = current_id {
        if !visited.insert(id) {
            warn!(?id, "outline sibling chain loops back on itself, stopping");
            break;
        }

        let dict = match doc.get_dictionary(id) {
            Ok(d) => d,
            Err(_) => break,
        };

        let title = dict.get(b"Title").map(decode_title).unwrap_or_default();

        let page = get_destination_page(doc, dict, &page_map);
        debug!(title = %title, ?page, "outline entry");
        entries.push(OutlineEntry { title, page });

        current_id = match dict.get(b"Next") {
            Ok(Object::Reference(r)) => Some(*r),
            _ => None,
        };
    }

    entries
}

/// Decode a bookmark title (PDFDocEncoding, or UTF-16BE/UTF-8 with a BOM).
fn decode_title(obj: &Object) -> String {
    let decoded = match lopdf::decode_text_string(obj) {
        Ok(text) => text,
        Err(e) => {
            debug!("title is not a valid text string ({}), decoding lossily", e);
            match obj {
                Object::String(bytes, _) => String::from_utf8_lossy(bytes).into_owned(),
                _ => String::new(),
            }
        }
    };
    // lopdf keeps the UTF-8 byte order mark
    decoded.trim_start_matches('\u{feff}').trim().to_string()
}

fn as_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Reference(r) => doc.get_dictionary(*r).ok(),
        Object::Dictionary(d) => Some(d),
        _ => None,
    }
}

fn get_destination_page(
    doc: &Document,
    dict: &Dictionary,
    page_map: &HashMap<ObjectId, u32>,
) -> Option<u32> {
    if let Ok(dest) = dict.get(b"Dest") {
        return resolve_destination(doc, dest, page_map, 0);
    }

    // GoTo action, inline or by reference
    let action = dict.get(b"A").ok().and_then(|a| as_dict(doc, a))?;
    match action.get(b"S") {
        Ok(Object::Name(kind)) if kind == b"GoTo" => {
            let dest = action.get(b"D").ok()?;
            resolve_destination(doc, dest, page_map, 0)
        }
        _ => None,
    }
}

fn resolve_destination(
    doc: &Document,
    dest: &Object,
    page_map: &HashMap<ObjectId, u32>,
    depth: usize,
) -> Option<u32> {
    if depth > MAX_DEST_DEPTH {
        return None;
    }

    match dest {
        Object::String(name, _) | Object::Name(name) => {
            resolve_named_destination(doc, name, page_map, depth + 1)
        }
        Object::Array(arr) => get_page_from_dest_array(arr, page_map),
        // Named destination values may be wrapped as << /D [...] >>
        Object::Dictionary(d) => {
            let inner = d.get(b"D").ok()?;
            resolve_destination(doc, inner, page_map, depth + 1)
        }
        Object::Reference(r) => {
            let obj = doc.get_object(*r).ok()?;
            resolve_destination(doc, obj, page_map, depth + 1)
        }
        _ => None,
    }
}

fn resolve_named_destination(
    doc: &Document,
    name: &[u8],
    page_map: &HashMap<ObjectId, u32>,
    depth: usize,
) -> Option<u32> {
    let catalog = doc.catalog().ok()?;

    // Names/Dests name tree
    if let Some(names_dict) = catalog.get(b"Names").ok().and_then(|n| as_dict(doc, n)) {
        if let Some(tree) = names_dict.get(b"Dests").ok().and_then(|d| as_dict(doc, d)) {
            let mut seen = HashSet::new();
            if let Some(dest) = search_name_tree(doc, tree, name, &mut seen) {
                if let Some(page) = resolve_destination(doc, dest, page_map, depth) {
                    return Some(page);
                }
            }
        }
    }

    // Older catalog-level Dests dictionary
    let dests = catalog.get(b"Dests").ok().and_then(|d| as_dict(doc, d))?;
    let dest = dests.get(name).ok()?;
    resolve_destination(doc, dest, page_map, depth)
}

fn search_name_tree<'a>(
    doc: &'a Document,
    node: &'a Dictionary,
    name: &[u8],
    seen: &mut HashSet<ObjectId>,
) -> Option<&'a Object> {
    // Leaf: [key1 value1 key2 value2 ...]
    if let Ok(Object::Array(names)) = node.get(b"Names") {
        for chunk in names.chunks_exact(2) {
            if let Object::String(key, _) = &chunk[0] {
                if key == name {
                    return Some(&chunk[1]);
                }
            }
        }
    }

    if let Ok(Object::Array(kids)) = node.get(b"Kids") {
        for kid in kids {
            if let Object::Reference(kid_ref) = kid {
                if !seen.insert(*kid_ref) {
                    continue;
                }
                if let Ok(kid_dict) = doc.get_dictionary(*kid_ref) {
                    if let Some(found) = search_name_tree(doc, kid_dict, name, seen) {
                        return Some(found);
                    }
                }
            }
        }
    }

    None
}

fn get_page_from_dest_array(arr: &[Object], page_map: &HashMap<ObjectId, u32>) -> Option<u32> {
    // [page_ref /XYZ left top zoom] and friends
    match arr.first()? {
        Object::Reference(page_ref) => page_map.get(page_ref).copied(),
        // Some producers write a zero-based page index instead of a reference
        Object::Integer(n) => {
            let n = u32::try_from(*n).ok()?;
            (n < page_map.len() as u32).then_some(n)
        }
        _ => None,
    }
}

/// Page object id to zero-based page index.
fn build_page_map(doc: &Document) -> HashMap<ObjectId, u32> {
    doc.get_pages()
        .into_iter()
        .map(|(num, id)| (id, num - 1))
        .collect()
}
