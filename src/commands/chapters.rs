use crate::chapters::OutputOrder;
use crate::splitter::{self, SplitConfig};
use anyhow::Result;
use std::path::Path;

/// Print what `split` would write, without writing it.
pub fn run<P: AsRef<Path>>(path: P, order: OutputOrder, selection: Option<String>) -> Result<()> {
    let path = path.as_ref();
    let mut config = SplitConfig::new(path, splitter::default_output_dir(path));
    config.order = order;
    config.selection = selection;
    let (_, plan) = splitter::load_plan(&config)?;

    println!(
        "{} pages, {} bookmark(s), {} chapter file(s) ({} order)",
        plan.total_pages,
        plan.chapters_detected,
        plan.chapters.len(),
        order
    );

    for chapter in &plan.chapters {
        let range = &chapter.range;
        println!(
            "  {}  pp. {}-{}  {}",
            chapter.file_name,
            range.start_page + 1,
            range.end_page,
            range.title
        );
    }

    if plan.reordered {
        println!("Note: bookmarks were not in page order and were sorted");
    }
    for skipped in &plan.skipped {
        println!("  skipped {}: {}", skipped.title, skipped.reason);
    }

    Ok(())
}
