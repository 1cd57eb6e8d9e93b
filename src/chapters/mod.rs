//! Turning an outline into a list of output files.
//!
//! The steps run in order: [`range::build_ranges`] pairs up chapter starts,
//! [`order::assign_indices`] numbers them for output and
//! [`sanitize::file_stem`] names the files. [`plan::plan_split`] drives all
//! three.

pub mod order;
pub mod plan;
pub mod range;
pub mod sanitize;

use crate::pdf::outline::OutlineEntry;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// A top-level bookmark that resolved to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    /// Zero-based
    pub start_page: u32,
}

/// A chapter with its output number and half-open page span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRange {
    pub title: String,
    /// 1-based, in output order
    pub index: usize,
    pub start_page: u32,
    pub end_page: u32,
}

impl ChapterRange {
    pub fn page_count(&self) -> u32 {
        self.end_page - self.start_page
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputOrder {
    /// Index 1 is the first chapter of the document
    #[default]
    Ascending,
    /// Index 1 is the last chapter of the document
    Descending,
}

impl fmt::Display for OutputOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputOrder::Ascending => f.write_str("ascending"),
            OutputOrder::Descending => f.write_str("descending"),
        }
    }
}

/// A chapter that will not produce a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedChapter {
    pub title: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The bookmark's destination does not resolve to a page
    UnresolvedDestination,
    /// The next chapter starts on the same page
    EmptyRange { page: u32 },
    /// The start page lies past the last page of the document
    PastEnd { page: u32, total_pages: u32 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnresolvedDestination => {
                f.write_str("bookmark destination does not resolve to a page")
            }
            SkipReason::EmptyRange { page } => {
                write!(f, "empty page range (next chapter also starts on page {})", page + 1)
            }
            SkipReason::PastEnd { page, total_pages } => write!(
                f,
                "starts on page {} but the document has {} pages",
                page + 1,
                total_pages
            ),
        }
    }
}

/// Split outline entries into chapters and bookmarks without a page.
pub fn resolve_chapters(entries: Vec<OutlineEntry>) -> (Vec<Chapter>, Vec<SkippedChapter>) {
    let mut chapters = Vec::new();
    let mut skipped = Vec::new();

    for entry in entries {
        match entry.page {
            Some(start_page) => chapters.push(Chapter {
                title: entry.title,
                start_page,
            }),
            None => {
                warn!(title = %entry.title, "skipping bookmark with unresolvable destination");
                skipped.push(SkippedChapter {
                    title: entry.title,
                    reason: SkipReason::UnresolvedDestination,
                });
            }
        }
    }

    (chapters, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_chapters_separates_unresolved() {
        let entries = vec![
            OutlineEntry {
                title: "Intro".into(),
                page: Some(0),
            },
            OutlineEntry {
                title: "Lost".into(),
                page: None,
            },
        ];

        let (chapters, skipped) = resolve_chapters(entries);
        assert_eq!(
            chapters,
            vec![Chapter {
                title: "Intro".into(),
                start_page: 0
            }]
        );
        assert_eq!(
            skipped,
            vec![SkippedChapter {
                title: "Lost".into(),
                reason: SkipReason::UnresolvedDestination
            }]
        );
    }

    #[test]
    fn test_skip_reason_display_is_one_based() {
        let reason = SkipReason::EmptyRange { page: 4 };
        assert_eq!(
            reason.to_string(),
            "empty page range (next chapter also starts on page 5)"
        );
    }
}
