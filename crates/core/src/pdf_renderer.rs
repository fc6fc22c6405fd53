//! PDF page rasterization using pdfium (Google's PDF engine).
//!
//! The converter talks to the renderer through the [`PdfBackend`] and
//! [`RasterDocument`] traits so that the page loop can be exercised without
//! a pdfium shared library present.

use crate::config::RenderConfig;
use crate::error::{ConversionError, Result};
use image::{Rgb, RgbImage, RgbaImage};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming a directory that contains the pdfium library.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_DYNAMIC_LIB_PATH";

/// Opens PDF documents for rasterization.
pub trait PdfBackend: Send + Sync {
    /// Open the document at `path`.
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn RasterDocument + 'a>>;
}

/// An open document whose pages can be rendered.
pub trait RasterDocument {
    fn page_count(&self) -> usize;

    /// Render the page at 0-based `index`, scaled uniformly by `scale`,
    /// flattened to opaque RGB.
    fn render_page(&self, index: usize, scale: f32) -> Result<RgbImage>;
}

/// [`PdfBackend`] backed by a dynamically or statically bound pdfium.
pub struct PdfiumBackend {
    pdfium: Pdfium,
    background_color: (u8, u8, u8),
}

impl PdfiumBackend {
    /// Bind pdfium.
    ///
    /// Search order: `config.pdfium_library_path`, `PDFIUM_DYNAMIC_LIB_PATH`,
    /// `./`, `./lib`, `/usr/lib`, `/usr/local/lib`, then the system library.
    pub fn new(config: &RenderConfig) -> Result<Self> {
        config.validate()?;

        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(dir) = &config.pdfium_library_path {
            candidates.push(dir.clone());
        }
        if let Ok(dir) = std::env::var(PDFIUM_LIB_PATH_ENV) {
            candidates.push(PathBuf::from(dir));
        }
        candidates.extend(
            ["./", "./lib", "/usr/lib", "/usr/local/lib"]
                .iter()
                .map(PathBuf::from),
        );

        let bindings = candidates
            .iter()
            .find_map(|dir| {
                match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)) {
                    Ok(bindings) => {
                        debug!("Bound pdfium from {:?}", dir);
                        Some(bindings)
                    }
                    Err(_) => None,
                }
            })
            .map(Ok)
            .unwrap_or_else(Pdfium::bind_to_system_library)
            .map_err(|e| {
                ConversionError::PdfiumError(format!("Failed to load pdfium library: {}", e))
            })?;

        info!("PDF renderer initialized");

        Ok(Self {
            pdfium: Pdfium::new(bindings),
            background_color: config.background_color,
        })
    }
}

impl PdfBackend for PdfiumBackend {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn RasterDocument + 'a>> {
        let document = self.pdfium.load_pdf_from_file(path, None).map_err(|e| {
            ConversionError::ConversionFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        Ok(Box::new(PdfiumDocument {
            document,
            background_color: self.background_color,
        }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
    background_color: (u8, u8, u8),
}

impl<'a> RasterDocument for PdfiumDocument<'a> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<RgbImage> {
        let page_error = |e: PdfiumError| ConversionError::PageRenderError {
            page: index + 1,
            message: e.to_string(),
        };

        let page = self.document.pages().get(index as u16).map_err(page_error)?;

        let render_config = PdfRenderConfig::new()
            .scale_page_by_factor(scale)
            .rotate_if_landscape(PdfPageRenderRotation::None, false);

        let bitmap = page.render_with_config(&render_config).map_err(page_error)?;

        Ok(flatten_onto(bitmap.as_image().into_rgba8(), self.background_color))
    }
}

/// Blend transparent pixels onto `background` and drop the alpha channel.
pub fn flatten_onto(image: RgbaImage, background: (u8, u8, u8)) -> RgbImage {
    let (r, g, b) = background;
    let mut out = RgbImage::new(image.width(), image.height());

    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        let alpha = src[3] as f32 / 255.0;
        let inv_alpha = 1.0 - alpha;
        *dst = Rgb([
            ((src[0] as f32 * alpha) + (r as f32 * inv_alpha)).round() as u8,
            ((src[1] as f32 * alpha) + (g as f32 * inv_alpha)).round() as u8,
            ((src[2] as f32 * alpha) + (b as f32 * inv_alpha)).round() as u8,
        ]);
    }

    out
}

/// Pixel size of a page measured in PDF points, rendered at `dpi`.
pub fn pixel_dimensions(width_points: f32, height_points: f32, dpi: u32) -> (u32, u32) {
    let scale = crate::config::scale_factor(dpi);
    (
        (width_points * scale).round() as u32,
        (height_points * scale).round() as u32,
    )
}
