//! The split pipeline: validate, plan, extract every chapter, summarize.
//!
//! Input and output-directory problems abort before anything is written.
//! Problems with a single chapter are recorded and the run moves on.

use crate::chapters::plan::{plan_split, SplitPlan};
use crate::chapters::{OutputOrder, SkippedChapter};
use crate::error::{Result, SplitError};
use crate::pdf::outline::read_outline;
use crate::pdf::PdfDocument;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub order: OutputOrder,
    /// Chapter positions to keep, e.g. "1-3,5"
    pub selection: Option<String>,
}

impl SplitConfig {
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        SplitConfig {
            source: source.into(),
            output_dir: output_dir.into(),
            order: OutputOrder::default(),
            selection: None,
        }
    }
}

/// `{stem}_chapters` next to the source file.
pub fn default_output_dir(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    source.with_file_name(format!("{}_chapters", stem))
}

#[derive(Debug, Clone, Serialize)]
pub struct WrittenChapter {
    pub index: usize,
    pub title: String,
    pub path: PathBuf,
    pub start_page: u32,
    pub end_page: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedChapter {
    pub index: usize,
    pub title: String,
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub order: OutputOrder,
    pub total_pages: u32,
    pub chapters_detected: usize,
    pub written: Vec<WrittenChapter>,
    pub skipped: Vec<SkippedChapter>,
    pub failed: Vec<FailedChapter>,
    pub reordered: bool,
}

impl SplitSummary {
    /// No chapter failed to write.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source: {} ({} pages)", self.source.display(), self.total_pages)?;
        writeln!(f, "Chapters detected: {}", self.chapters_detected)?;
        writeln!(
            f,
            "Wrote {} file(s) to {} ({} order)",
            self.written.len(),
            self.output_dir.display(),
            self.order
        )?;
        if self.reordered {
            writeln!(f, "Note: bookmarks were not in page order and were sorted")?;
        }
        if !self.skipped.is_empty() {
            writeln!(f, "Skipped {}:", self.skipped.len())?;
            for s in &self.skipped {
                writeln!(f, "  {}: {}", s.title, s.reason)?;
            }
        }
        if !self.failed.is_empty() {
            writeln!(f, "Failed {}:", self.failed.len())?;
            for c in &self.failed {
                writeln!(f, "  {:02} {}: {}", c.index, c.title, c.reason)?;
            }
        }
        Ok(())
    }
}

/// Open the source and work out the plan without writing anything.
pub fn load_plan(config: &SplitConfig) -> Result<(PdfDocument, SplitPlan)> {
    let doc = PdfDocument::open(&config.source)?;
    let entries = read_outline(&doc.doc);
    let plan = plan_split(
        entries,
        doc.page_count(),
        config.order,
        config.selection.as_deref(),
    )?;

    if plan.is_empty() {
        return Err(SplitError::NoChaptersFound {
            path: config.source.clone(),
        });
    }

    Ok((doc, plan))
}

/// Write one PDF per planned chapter into `config.output_dir`.
///
/// Returns `Err` only for problems found before the first file is written.
/// Per-chapter failures end up in [`SplitSummary::failed`].
pub fn split(config: &SplitConfig) -> Result<SplitSummary> {
    let (doc, plan) = load_plan(config)?;
    prepare_output_dir(&config.output_dir)?;

    info!(
        source = %doc.path.display(),
        chapters = plan.chapters.len(),
        order = %config.order,
        "splitting PDF"
    );

    let mut summary = SplitSummary {
        source: config.source.clone(),
        output_dir: config.output_dir.clone(),
        order: config.order,
        total_pages: plan.total_pages,
        chapters_detected: plan.chapters_detected,
        written: Vec::new(),
        skipped: plan.skipped,
        failed: Vec::new(),
        reordered: plan.reordered,
    };

    for chapter in plan.chapters {
        let range = chapter.range;
        let path = config.output_dir.join(&chapter.file_name);
        debug!(
            file = %path.display(),
            start_page = range.start_page,
            end_page = range.end_page,
            "extracting chapter"
        );

        let result = doc
            .extract_range(range.start_page..range.end_page)
            .map_err(anyhow::Error::from)
            .and_then(|mut part| PdfDocument::save(&mut part, &path));

        match result {
            Ok(()) => {
                info!(file = %path.display(), pages = range.page_count(), "wrote chapter");
                summary.written.push(WrittenChapter {
                    index: range.index,
                    title: range.title,
                    path,
                    start_page: range.start_page,
                    end_page: range.end_page,
                });
            }
            Err(e) => {
                warn!(file = %path.display(), "failed to write chapter: {:#}", e);
                summary.failed.push(FailedChapter {
                    index: range.index,
                    title: range.title,
                    path,
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    info!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        "split finished"
    );

    Ok(summary)
}

/// Create the output directory and make sure files can be created in it.
fn prepare_output_dir(dir: &Path) -> Result<()> {
    let output_dir_error = |source| SplitError::OutputDir {
        path: dir.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(output_dir_error)?;

    // removed again when dropped
    tempfile::Builder::new()
        .prefix(".chapsplit-")
        .tempfile_in(dir)
        .map_err(output_dir_error)?;

    Ok(())
}
