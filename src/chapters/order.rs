use super::range::PageSpan;
use super::{ChapterRange, OutputOrder};

/// Put spans in output order and number them from 1.
///
/// `spans` must be in document order. `Descending` only changes which span
/// gets which number; the spans themselves are untouched. When `selected`
/// is given, only those 1-based positions (counted in output order) are
/// kept and renumbered consecutively.
pub fn assign_indices(
    spans: Vec<PageSpan>,
    order: OutputOrder,
    selected: Option<&[usize]>,
) -> Vec<ChapterRange> {
    let mut spans = spans;
    if order == OutputOrder::Descending {
        spans.reverse();
    }

    spans
        .into_iter()
        .enumerate()
        .filter(|(i, _)| selected.is_none_or(|positions| positions.contains(&(i + 1))))
        .enumerate()
        .map(|(n, (_, span))| ChapterRange {
            title: span.title,
            index: n + 1,
            start_page: span.start_page,
            end_page: span.end_page,
        })
        .collect()
}
