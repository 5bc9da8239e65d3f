use std::path::Path;

use crate::error::{Error, Result};
use crate::pdf::{DocumentBuilder, PdfDocument};
use crate::status::StatusSink;

/// Merge `inputs` into a single document at `output`, in argument order.
pub fn run<P: AsRef<Path>>(inputs: &[P], output: &Path, status: &mut dyn StatusSink) -> Result<()> {
    if inputs.len() < 2 {
        return Err(Error::NotEnoughInputs {
            needed: 2,
            got: inputs.len(),
        });
    }

    status.update("Merging...");

    let mut builder = DocumentBuilder::new();
    for input in inputs {
        let input = input.as_ref();
        let doc = PdfDocument::open(input)?;
        let all_pages: Vec<usize> = (0..doc.page_count()).collect();
        log::debug!("merging {} ({} pages)", input.display(), all_pages.len());
        builder.copy_pages(&doc, &all_pages)?;
    }

    let total = builder.page_count();
    let mut merged = builder.finish()?;
    merged.save(output)?;

    status.update(&format!(
        "Finished: merged {} files ({} pages) into {}.",
        inputs.len(),
        total,
        output.display()
    ));
    Ok(())
}
