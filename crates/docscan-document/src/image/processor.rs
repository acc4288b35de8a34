// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decoding, working-resolution resizing and encoding of
// page images. Operates on in-memory images using the `image` crate.

use docscan_core::error::DocscanError;
use docscan_core::PageFormat;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

/// Image I/O and resizing around a single in-memory image.
///
/// Each transforming method consumes `self` and returns a new
/// `ImageProcessor`, enabling method chaining.
///
/// ```ignore
/// let jpeg = ImageProcessor::open("photo.jpg")?
///     .resize_exact(1300, 800)
///     .to_jpeg_bytes(90)?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, DocscanError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            DocscanError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(
            width = img.width(),
            height = img.height(),
            "Image loaded"
        );
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, DocscanError> {
        let img = image::load_from_memory(data).map_err(|err| {
            DocscanError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Resize to exactly `width` x `height`, ignoring aspect ratio.
    ///
    /// Uses bilinear (triangle) filtering, which keeps page edges sharp enough
    /// for edge detection without the ringing of Lanczos.
    #[instrument(skip(self))]
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        debug!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            "Resizing image"
        );
        let resized =
            self.image
                .resize_exact(width, height, image::imageops::FilterType::Triangle);
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, DocscanError> {
        encode_to_format(&self.image, ImageFormat::Png)
    }

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, DocscanError> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder).map_err(|err| {
            DocscanError::ImageError(format!("JPEG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }

    /// Encode in `format`; `jpeg_quality` is ignored for PNG.
    pub fn encode(&self, format: PageFormat, jpeg_quality: u8) -> Result<Vec<u8>, DocscanError> {
        match format {
            PageFormat::Png => self.to_png_bytes(),
            PageFormat::Jpeg => self.to_jpeg_bytes(jpeg_quality),
        }
    }

    /// Write the image to `path`, encoding by the file extension.
    ///
    /// Only PNG and JPEG extensions are accepted.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), jpeg_quality))]
    pub fn save(
        &self,
        path: impl AsRef<std::path::Path>,
        jpeg_quality: u8,
    ) -> Result<(), DocscanError> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(PageFormat::from_extension)
            .ok_or_else(|| {
                DocscanError::ImageError(format!(
                    "unsupported output extension for {} (use .png, .jpg or .jpeg)",
                    path.display()
                ))
            })?;
        let bytes = self.encode(format, jpeg_quality)?;
        std::fs::write(path, &bytes)?;
        info!(bytes = bytes.len(), ?format, "Image written");
        Ok(())
    }
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(
    image: &DynamicImage,
    format: ImageFormat,
) -> Result<Vec<u8>, DocscanError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, format).map_err(|err| {
        DocscanError::ImageError(format!("image encoding failed: {}", err))
    })?;
    Ok(buffer)
}
