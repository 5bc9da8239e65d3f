use std::fs;
use std::path::Path;

use image::{ColorType, GenericImageView, ImageFormat};
use lopdf::{Dictionary, Object, Stream};

use crate::error::{Error, Result};

/// A decoded image ready to be embedded as a PDF image XObject.
///
/// JPEG data is kept verbatim and embedded under a DCTDecode filter; PNG is
/// re-encoded as raw 8-bit samples (the document-level compression pass
/// flate-compresses those on save). Alpha channels are dropped.
#[derive(Debug)]
pub struct EmbeddedImage {
    pub width: u32,
    pub height: u32,
    color_space: &'static str,
    filter: Option<&'static str>,
    data: Vec<u8>,
}

impl EmbeddedImage {
    /// Read and decode a JPEG or PNG file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Self::from_bytes(path, &bytes)
    }

    /// Decode a JPEG or PNG byte buffer. `path` only feeds error messages.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self> {
        let format = image::guess_format(bytes).map_err(|_| Error::UnsupportedImageType {
            path: path.to_path_buf(),
        })?;
        match format {
            ImageFormat::Jpeg => Self::from_jpeg(path, bytes),
            ImageFormat::Png => Self::from_png(path, bytes),
            _ => Err(Error::UnsupportedImageType {
                path: path.to_path_buf(),
            }),
        }
    }

    /// JPEG goes into the document untouched; decoding is only needed for
    /// the dimensions and channel count.
    fn from_jpeg(path: &Path, bytes: &[u8]) -> Result<Self> {
        let img = decode(path, bytes)?;
        let (width, height) = img.dimensions();
        Ok(EmbeddedImage {
            width,
            height,
            color_space: color_space_for(img.color()),
            filter: Some("DCTDecode"),
            data: bytes.to_vec(),
        })
    }

    fn from_png(path: &Path, bytes: &[u8]) -> Result<Self> {
        let img = decode(path, bytes)?;
        let (width, height) = img.dimensions();
        let color_space = color_space_for(img.color());
        let data = if color_space == "DeviceGray" {
            img.to_luma8().into_raw()
        } else {
            img.to_rgb8().into_raw()
        };
        Ok(EmbeddedImage {
            width,
            height,
            color_space,
            filter: None,
            data,
        })
    }

    /// Build the image XObject stream.
    pub fn into_xobject(self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(i64::from(self.width)));
        dict.set("Height", Object::Integer(i64::from(self.height)));
        dict.set(
            "ColorSpace",
            Object::Name(self.color_space.as_bytes().to_vec()),
        );
        dict.set("BitsPerComponent", Object::Integer(8));
        if let Some(filter) = self.filter {
            dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
        }
        Stream::new(dict, self.data)
    }
}

fn decode(path: &Path, bytes: &[u8]) -> Result<image::DynamicImage> {
    image::load_from_memory(bytes).map_err(|source| Error::ImageDecode {
        path: path.to_path_buf(),
        source,
    })
}

fn color_space_for(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16 => "DeviceGray",
        _ => "DeviceRGB",
    }
}
