use std::path::Path;

use crate::error::{Error, Result};
use crate::pdf::{DocumentBuilder, EmbeddedImage};
use crate::status::StatusSink;

/// Assemble `inputs` (JPEG or PNG files) into one document at `output`, a
/// page per image, each page sized to its image.
pub fn run<P: AsRef<Path>>(inputs: &[P], output: &Path, status: &mut dyn StatusSink) -> Result<()> {
    if inputs.is_empty() {
        return Err(Error::NotEnoughInputs { needed: 1, got: 0 });
    }

    status.update("Converting images...");

    let mut builder = DocumentBuilder::new();
    for input in inputs {
        let input = input.as_ref();
        let image = EmbeddedImage::open(input)?;
        log::debug!(
            "adding {} ({}x{})",
            input.display(),
            image.width,
            image.height
        );
        builder.add_image_page(image)?;
    }

    let mut doc = builder.finish()?;
    doc.save(output)?;

    status.update(&format!(
        "Finished: converted {} image(s) into {}.",
        inputs.len(),
        output.display()
    ));
    Ok(())
}
