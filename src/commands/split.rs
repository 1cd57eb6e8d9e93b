use crate::frontend::FrontEnd;
use crate::splitter;
use anyhow::{bail, Result};

pub fn run(front_end: &mut dyn FrontEnd) -> Result<()> {
    let config = front_end.request_config()?;
    let summary = splitter::split(&config)?;
    front_end.report(&summary)?;

    if !summary.is_complete() {
        bail!(
            "{} of {} chapter(s) could not be written",
            summary.failed.len(),
            summary.failed.len() + summary.written.len()
        );
    }

    Ok(())
}
