use super::order::assign_indices;
use super::range::build_ranges;
use super::sanitize::file_stem;
use super::{resolve_chapters, ChapterRange, OutputOrder, SkippedChapter};
use crate::error::Result;
use crate::pdf::outline::OutlineEntry;
use crate::selection::expand_selection;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PlannedChapter {
    #[serde(flatten)]
    pub range: ChapterRange,
    pub file_name: String,
}

/// Everything a split will do, worked out before anything is written.
#[derive(Debug, Clone, Serialize)]
pub struct SplitPlan {
    pub total_pages: u32,
    /// Top-level outline entries, including the ones that are skipped
    pub chapters_detected: usize,
    /// In output order
    pub chapters: Vec<PlannedChapter>,
    pub skipped: Vec<SkippedChapter>,
    pub reordered: bool,
}

impl SplitPlan {
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

pub fn plan_split(
    entries: Vec<OutlineEntry>,
    total_pages: u32,
    order: OutputOrder,
    selection: Option<&str>,
) -> Result<SplitPlan> {
    let chapters_detected = entries.len();
    let (chapters, mut skipped) = resolve_chapters(entries);
    let ranges = build_ranges(&chapters, total_pages);
    skipped.extend(ranges.skipped);

    let selected = match selection {
        Some(s) if !ranges.spans.is_empty() => Some(expand_selection(s, ranges.spans.len())?),
        _ => None,
    };

    let ordered = assign_indices(ranges.spans, order, selected.as_deref());
    let total = ordered.len();
    let chapters = ordered
        .into_iter()
        .map(|range| PlannedChapter {
            file_name: format!("{}.pdf", file_stem(&range.title, range.index, total)),
            range,
        })
        .collect();

    Ok(SplitPlan {
        total_pages,
        chapters_detected,
        chapters,
        skipped,
        reordered: ranges.reordered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::SkipReason;
    use crate::error::SplitError;
    use pretty_assertions::assert_eq;

    fn entries(list: &[(&str, Option<u32>)]) -> Vec<OutlineEntry> {
        list.iter()
            .map(|(title, page)| OutlineEntry {
                title: title.to_string(),
                page: *page,
            })
            .collect()
    }

    fn book() -> Vec<OutlineEntry> {
        entries(&[("Intro", Some(0)), ("Ch1", Some(5)), ("Ch2", Some(12))])
    }

    fn files(plan: &SplitPlan) -> Vec<(&str, u32, u32)> {
        plan.chapters
            .iter()
            .map(|c| (c.file_name.as_str(), c.range.start_page, c.range.end_page))
            .collect()
    }

    #[test]
    fn test_ascending_plan() {
        let plan = plan_split(book(), 20, OutputOrder::Ascending, None).unwrap();
        assert_eq!(
            files(&plan),
            vec![
                ("01_Intro.pdf", 0, 5),
                ("02_Ch1.pdf", 5, 12),
                ("03_Ch2.pdf", 12, 20),
            ]
        );
        assert_eq!(plan.chapters_detected, 3);
    }

    #[test]
    fn test_descending_plan() {
        let plan = plan_split(book(), 20, OutputOrder::Descending, None).unwrap();
        assert_eq!(
            files(&plan),
            vec![
                ("01_Ch2.pdf", 12, 20),
                ("02_Ch1.pdf", 5, 12),
                ("03_Intro.pdf", 0, 5),
            ]
        );
    }

    #[test]
    fn test_unresolved_entry_is_skipped() {
        let plan = plan_split(
            entries(&[("Intro", Some(0)), ("Lost", None), ("Ch2", Some(12))]),
            20,
            OutputOrder::Ascending,
            None,
        )
        .unwrap();

        assert_eq!(
            files(&plan),
            vec![("01_Intro.pdf", 0, 12), ("02_Ch2.pdf", 12, 20)]
        );
        assert_eq!(plan.chapters_detected, 3);
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].reason, SkipReason::UnresolvedDestination);
    }

    #[test]
    fn test_selection_uses_selected_count_for_width() {
        let many: Vec<OutlineEntry> = (0..120)
            .map(|i| OutlineEntry {
                title: format!("Ch{}", i + 1),
                page: Some(i),
            })
            .collect();

        let plan = plan_split(many, 120, OutputOrder::Ascending, Some("1,120")).unwrap();
        let names: Vec<&str> = plan.chapters.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, vec!["01_Ch1.pdf", "02_Ch120.pdf"]);
    }

    #[test]
    fn test_wide_index_without_selection() {
        let many: Vec<OutlineEntry> = (0..120)
            .map(|i| OutlineEntry {
                title: format!("Ch{}", i + 1),
                page: Some(i),
            })
            .collect();

        let plan = plan_split(many, 120, OutputOrder::Ascending, None).unwrap();
        assert_eq!(plan.chapters[0].file_name, "001_Ch1.pdf");
        assert_eq!(plan.chapters[119].file_name, "120_Ch120.pdf");
    }

    #[test]
    fn test_bad_selection() {
        let err = plan_split(book(), 20, OutputOrder::Ascending, Some("4")).unwrap_err();
        assert!(matches!(err, SplitError::InvalidSelection(_)));
    }

    #[test]
    fn test_empty_outline_gives_empty_plan() {
        let plan = plan_split(Vec::new(), 20, OutputOrder::Ascending, Some("1")).unwrap();
        assert!(plan.is_empty());
    }
}
