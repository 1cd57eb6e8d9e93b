use super::{Chapter, SkipReason, SkippedChapter};
use tracing::{debug, warn};

/// A chapter's half-open page span, before it is numbered for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpan {
    pub title: String,
    pub start_page: u32,
    pub end_page: u32,
}

#[derive(Debug, Default)]
pub struct Ranges {
    /// Non-empty spans in document order, covering every page once
    pub spans: Vec<PageSpan>,
    pub skipped: Vec<SkippedChapter>,
    /// The outline was not in page order and had to be sorted
    pub reordered: bool,
}

/// Pair each chapter start with the next one (or the document end).
///
/// Chapters are stably sorted by start page first. A chapter that starts on
/// the same page as the next one has no pages of its own and is skipped.
/// Pages ahead of the first chapter belong to the first chapter.
pub fn build_ranges(chapters: &[Chapter], total_pages: u32) -> Ranges {
    let mut skipped = Vec::new();
    let mut sorted: Vec<&Chapter> = Vec::with_capacity(chapters.len());
    for chapter in chapters {
        if chapter.start_page < total_pages {
            sorted.push(chapter);
        } else {
            warn!(
                title = %chapter.title,
                page = chapter.start_page + 1,
                total_pages,
                "skipping chapter that starts past the last page"
            );
            skipped.push(SkippedChapter {
                title: chapter.title.clone(),
                reason: SkipReason::PastEnd {
                    page: chapter.start_page,
                    total_pages,
                },
            });
        }
    }

    let reordered = sorted.windows(2).any(|w| w[0].start_page > w[1].start_page);
    if reordered {
        warn!("outline entries are not in page order, sorting them by start page");
        sorted.sort_by_key(|c| c.start_page);
    }

    let mut ranges = Ranges {
        spans: Vec::new(),
        skipped,
        reordered,
    };

    for (i, chapter) in sorted.iter().enumerate() {
        let end_page = sorted
            .get(i + 1)
            .map_or(total_pages, |next| next.start_page);

        if chapter.start_page == end_page {
            warn!(
                title = %chapter.title,
                page = chapter.start_page + 1,
                "skipping chapter with an empty page range"
            );
            ranges.skipped.push(SkippedChapter {
                title: chapter.title.clone(),
                reason: SkipReason::EmptyRange {
                    page: chapter.start_page,
                },
            });
            continue;
        }

        let start_page = if ranges.spans.is_empty() && chapter.start_page > 0 {
            debug!(
                title = %chapter.title,
                leading_pages = chapter.start_page,
                "first chapter absorbs the pages before it"
            );
            0
        } else {
            chapter.start_page
        };

        debug!(title = %chapter.title, start_page, end_page, "chapter span");
        ranges.spans.push(PageSpan {
            title: chapter.title.clone(),
            start_page,
            end_page,
        });
    }

    ranges
}
