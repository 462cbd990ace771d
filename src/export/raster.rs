//! Scene capture into RGBA bitmaps and bitmap encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};

use crate::error::ExportError;

/// JPEG quality used for images embedded in PDF documents.
const JPEG_QUALITY: u8 = 92;

/// An opaque RGBA bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Bitmap {
    /// Wrap raw RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::CaptureFailed` when the buffer length does not
    /// match the dimensions.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ExportError> {
        let expected = u64::from(width) * u64::from(height) * 4;
        if u64::try_from(rgba.len()).ok() != Some(expected) {
            return Err(ExportError::CaptureFailed {
                message: format!(
                    "bitmap buffer holds {} bytes, expected {expected}",
                    rgba.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    fn to_image(&self) -> Result<RgbaImage, ExportError> {
        RgbaImage::from_raw(self.width, self.height, self.rgba.clone()).ok_or_else(|| {
            ExportError::EncodeFailed {
                format: String::from("bitmap"),
                message: String::from("pixel buffer does not match dimensions"),
            }
        })
    }

    /// Encode as PNG.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::EncodeFailed` if the encoder rejects the image.
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(self.to_image()?)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|error| ExportError::EncodeFailed {
                format: String::from("png"),
                message: error.to_string(),
            })?;
        Ok(bytes)
    }

    /// Encode as baseline RGB JPEG.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::EncodeFailed` if the encoder rejects the image.
    pub fn encode_jpeg(&self) -> Result<Vec<u8>, ExportError> {
        let rgb = DynamicImage::ImageRgba8(self.to_image()?).to_rgb8();
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY)
            .write_image(rgb.as_raw(), self.width, self.height, ExtendedColorType::Rgb8)
            .map_err(|error| ExportError::EncodeFailed {
                format: String::from("jpeg"),
                message: error.to_string(),
            })?;
        Ok(bytes)
    }
}

/// Turns SVG markup into a bitmap.
pub trait Rasterizer {
    /// Render `svg` at `width` by `height` logical pixels, multiplied by
    /// `scale`, over a white background.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::CaptureFailed` when the markup cannot be parsed or
    /// the canvas cannot be allocated.
    fn rasterize(
        &self,
        svg: &str,
        width: u32,
        height: u32,
        scale: u32,
    ) -> Result<Bitmap, ExportError>;
}

/// [`Rasterizer`] backed by `resvg`.
#[derive(Debug, Clone)]
pub struct ResvgRasterizer {
    fontdb: usvg::fontdb::Database,
}

impl ResvgRasterizer {
    /// Create a rasteriser with the system fonts loaded.
    #[must_use]
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        tracing::debug!(faces = fontdb.len(), "loaded system fonts");
        Self { fontdb }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(
        &self,
        svg: &str,
        width: u32,
        height: u32,
        scale: u32,
    ) -> Result<Bitmap, ExportError> {
        let mut options = usvg::Options::default();
        *options.fontdb_mut() = self.fontdb.clone();

        let tree = usvg::Tree::from_str(svg, &options).map_err(|error| {
            ExportError::CaptureFailed {
                message: error.to_string(),
            }
        })?;

        let pixel_width = width.saturating_mul(scale);
        let pixel_height = height.saturating_mul(scale);
        let mut pixmap = tiny_skia::Pixmap::new(pixel_width, pixel_height).ok_or_else(|| {
            ExportError::CaptureFailed {
                message: format!("cannot allocate a {pixel_width}x{pixel_height} canvas"),
            }
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        #[expect(
            clippy::cast_precision_loss,
            reason = "export scale factors are single digits"
        )]
        let factor = scale as f32;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(factor, factor),
            &mut pixmap.as_mut(),
        );

        // The white fill makes every pixel opaque, so premultiplied and
        // straight alpha coincide.
        Bitmap::from_rgba(pixel_width, pixel_height, pixmap.take())
    }
}
