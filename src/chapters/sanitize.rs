//! Chapter titles to file names.
//!
//! The rules are the same on every host so a split produces the same names
//! everywhere.

/// Characters that are unsafe in a path component on at least one common
/// filesystem. Control characters are rejected as well.
pub const DENYLIST: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Longest sanitized title, in bytes, before the index prefix is added.
pub const MAX_TITLE_BYTES: usize = 120;

pub const UNTITLED: &str = "Untitled";

/// Make `title` safe to use inside a file name.
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                ' '
            } else if c.is_control() || DENYLIST.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated = truncate_on_char_boundary(&collapsed, MAX_TITLE_BYTES);

    // Windows drops trailing dots and spaces silently
    let trimmed = truncated.trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

fn truncate_on_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Digits used for the index prefix: enough for `total`, at least two.
pub fn index_width(total: usize) -> usize {
    total.max(1).to_string().len().max(2)
}

/// Output file name without extension, e.g. `01_Introduction`.
pub fn file_stem(title: &str, index: usize, total: usize) -> String {
    format!(
        "{:0width$}_{}",
        index,
        sanitize_title(title),
        width = index_width(total)
    )
}
