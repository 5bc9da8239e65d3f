use std::path::Path;

use crate::error::Result;
use crate::page_range::resolve_page_indices;
use crate::pdf::{DocumentBuilder, PdfDocument};
use crate::status::StatusSink;

/// Extract the pages named by `pages` from `input` into a new document.
pub fn run(input: &Path, pages: &str, output: &Path, status: &mut dyn StatusSink) -> Result<()> {
    // The whole expression is validated before the document is touched.
    let indices = resolve_page_indices(pages)?;

    status.update("Extracting...");

    let doc = PdfDocument::open(input)?;
    log::debug!(
        "extracting {} page(s) from {} ({} pages)",
        indices.len(),
        input.display(),
        doc.page_count()
    );

    let mut builder = DocumentBuilder::new();
    builder.copy_pages(&doc, &indices)?;
    let mut extracted = builder.finish()?;
    extracted.save(output)?;

    status.update(&format!(
        "Finished: wrote {} page(s) to {}.",
        indices.len(),
        output.display()
    ));
    Ok(())
}
