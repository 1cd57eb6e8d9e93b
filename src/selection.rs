use crate::error::{Result, SplitError};
use std::collections::BTreeSet;

/// One comma-separated part of a chapter selection like "1-3,5,7-end".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: ChapterRef,
    pub end: Option<ChapterRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterRef {
    Number(usize),
    End,
}

impl SelectionRange {
    /// Parse a selection part like "1-5", "9-6", "2-end", "4"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(invalid("empty chapter range"));
        }

        if let Some((start, end)) = s.split_once('-') {
            // "-5" is not a range
            if start.trim().is_empty() {
                return Err(invalid(format!("invalid chapter range: {}", s)));
            }
            Ok(SelectionRange {
                start: parse_chapter_ref(start)?,
                end: Some(parse_chapter_ref(end)?),
            })
        } else {
            Ok(SelectionRange {
                start: parse_chapter_ref(s)?,
                end: None,
            })
        }
    }

    /// Expand into 1-based chapter positions out of `total`.
    pub fn expand(&self, total: usize) -> Result<Vec<usize>> {
        let resolve = |r: &ChapterRef| match r {
            ChapterRef::Number(n) => *n,
            ChapterRef::End => total,
        };

        let start = resolve(&self.start);
        let end = self.end.as_ref().map_or(start, resolve);

        if start == 0 || end == 0 {
            return Err(invalid("chapter numbers must be >= 1"));
        }
        for n in [start, end] {
            if n > total {
                return Err(invalid(format!(
                    "chapter {} exceeds chapter count {}",
                    n, total
                )));
            }
        }

        Ok((start.min(end)..=start.max(end)).collect())
    }
}

fn invalid(msg: impl Into<String>) -> SplitError {
    SplitError::InvalidSelection(msg.into())
}

fn parse_chapter_ref(s: &str) -> Result<ChapterRef> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("end") {
        Ok(ChapterRef::End)
    } else {
        s.parse::<usize>()
            .map(ChapterRef::Number)
            .map_err(|_| invalid(format!("invalid chapter number: {}", s)))
    }
}

/// Parse a comma-separated selection like "1-3,5,7-end"
pub fn parse_selection(s: &str) -> Result<Vec<SelectionRange>> {
    s.split(',').map(SelectionRange::parse).collect()
}

/// Expand a selection into sorted, de-duplicated 1-based chapter positions.
pub fn expand_selection(s: &str, total: usize) -> Result<Vec<usize>> {
    let mut positions = BTreeSet::new();
    for range in parse_selection(s)? {
        positions.extend(range.expand(total)?);
    }
    Ok(positions.into_iter().collect())
}
