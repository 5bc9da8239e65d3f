pub mod assemble;
pub mod document;
pub mod image;

pub use assemble::DocumentBuilder;
pub use document::PdfDocument;
pub use image::EmbeddedImage;
