//! Configuration and request types for PDF to image conversion.

use crate::error::{ConversionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// PDF user space is defined at 72 points per inch.
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

/// DPI used when a quality label is not recognised.
pub const DEFAULT_DPI: u32 = 200;

/// Highest DPI accepted by [`RenderConfig::validate_dpi`].
pub const MAX_DPI: u32 = 2400;

/// Raster format written for each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Tiff,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Png, OutputFormat::Jpeg, OutputFormat::Tiff];

    /// File extension: the lower-cased format name.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Tiff => "tiff",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::Jpeg => write!(f, "JPEG"),
            OutputFormat::Tiff => write!(f, "TIFF"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "tiff" | "tif" => Ok(OutputFormat::Tiff),
            other => Err(ConversionError::InvalidConfig(format!(
                "unsupported output format '{}', expected PNG, JPEG or TIFF",
                other
            ))),
        }
    }
}

/// Quality presets offered to users instead of raw DPI values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    General,
    #[default]
    Clear,
    HighDefinition,
    Print,
}

impl Quality {
    pub const ALL: [Quality; 4] = [
        Quality::General,
        Quality::Clear,
        Quality::HighDefinition,
        Quality::Print,
    ];

    pub fn dpi(&self) -> u32 {
        match self {
            Quality::General => 150,
            Quality::Clear => 200,
            Quality::HighDefinition => 300,
            Quality::Print => 600,
        }
    }

    /// Recognise a label, either English or the original Chinese wording.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "general" | "一般" => Some(Quality::General),
            "clear" | "清晰" => Some(Quality::Clear),
            "hd" | "high-definition" | "high_definition" | "高清" => {
                Some(Quality::HighDefinition)
            }
            "print" | "打印" => Some(Quality::Print),
            _ => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::General => write!(f, "general"),
            Quality::Clear => write!(f, "clear"),
            Quality::HighDefinition => write!(f, "high-definition"),
            Quality::Print => write!(f, "print"),
        }
    }
}

/// Map a quality label to DPI. Unknown labels fall back to [`DEFAULT_DPI`].
pub fn quality_to_dpi(label: &str) -> u32 {
    Quality::from_label(label)
        .map(|q| q.dpi())
        .unwrap_or(DEFAULT_DPI)
}

/// Linear scale factor applied to both axes when rendering at `dpi`.
pub fn scale_factor(dpi: u32) -> f32 {
    dpi as f32 / PDF_POINTS_PER_INCH
}

/// 1-based inclusive page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageRangeFields")]
pub struct PageRange {
    start: usize,
    end: usize,
}

impl PageRange {
    /// Create a range, rejecting `start == 0` and `start > end`.
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start == 0 || start > end {
            return Err(ConversionError::InvalidPageRange(format!(
                "{}-{}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// A single page.
    pub fn single(page: usize) -> Result<Self> {
        Self::new(page, page)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Clamp to a document of `page_count` pages, as 0-based page indices.
    ///
    /// A range that starts past the last page yields an empty span.
    pub fn index_span(&self, page_count: usize) -> Range<usize> {
        let end = page_count.min(self.end);
        let start = self.start.saturating_sub(1).min(end);
        start..end
    }
}

/// Unchecked serde form of [`PageRange`].
#[derive(Deserialize)]
struct PageRangeFields {
    start: usize,
    end: usize,
}

impl TryFrom<PageRangeFields> for PageRange {
    type Error = ConversionError;

    fn try_from(fields: PageRangeFields) -> Result<Self> {
        Self::new(fields.start, fields.end)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PageRange {
    type Err = ConversionError;

    /// Parse `start-end` or a single `start`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ConversionError::InvalidPageRange(s.to_string());
        let trimmed = s.trim();
        match trimmed.split_once('-') {
            Some((start, end)) => {
                let start = start.trim().parse::<usize>().map_err(|_| invalid())?;
                let end = end.trim().parse::<usize>().map_err(|_| invalid())?;
                Self::new(start, end).map_err(|_| invalid())
            }
            None => {
                let page = trimmed.parse::<usize>().map_err(|_| invalid())?;
                Self::single(page).map_err(|_| invalid())
            }
        }
    }
}

/// Configuration for page rendering and encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// PNG compression level (0-9, higher = smaller file, slower).
    /// Default: 6.
    pub png_compression: u8,

    /// JPEG quality (1-100).
    /// Default: 90.
    pub jpeg_quality: u8,

    /// Colour transparent regions are flattened onto.
    /// Default: white (255, 255, 255).
    pub background_color: (u8, u8, u8),

    /// Directory containing the pdfium shared library.
    /// Default: search `PDFIUM_DYNAMIC_LIB_PATH`, then well-known locations.
    pub pdfium_library_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            png_compression: 6,
            jpeg_quality: 90,
            background_color: (255, 255, 255),
            pdfium_library_path: None,
        }
    }
}

impl RenderConfig {
    /// Set PNG compression level.
    pub fn png_compression(mut self, level: u8) -> Self {
        self.png_compression = level.min(9);
        self
    }

    /// Set JPEG quality.
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the background colour.
    pub fn background_color(mut self, rgb: (u8, u8, u8)) -> Self {
        self.background_color = rgb;
        self
    }

    /// Set the pdfium library directory.
    pub fn pdfium_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.pdfium_library_path = Some(path.into());
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.png_compression > 9 {
            return Err(ConversionError::InvalidConfig(
                "png_compression must be between 0 and 9".to_string(),
            ));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(ConversionError::InvalidConfig(
                "jpeg_quality must be between 1 and 100".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate a requested DPI.
    pub fn validate_dpi(dpi: u32) -> Result<()> {
        if dpi == 0 || dpi > MAX_DPI {
            return Err(ConversionError::InvalidConfig(format!(
                "dpi must be between 1 and {}",
                MAX_DPI
            )));
        }
        Ok(())
    }
}

/// A single-document conversion request.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Path to the source PDF.
    pub input_path: PathBuf,

    /// Directory to write images to.
    /// Default: the source's directory.
    pub output_dir: Option<PathBuf>,

    /// Output image format.
    pub format: OutputFormat,

    /// Render resolution.
    pub dpi: u32,

    /// Pages to convert. Default: all pages.
    pub page_range: Option<PageRange>,
}

impl ConversionRequest {
    /// Create a request for all pages as PNG at [`DEFAULT_DPI`].
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: None,
            format: OutputFormat::default(),
            dpi: DEFAULT_DPI,
            page_range: None,
        }
    }

    /// Write into a specific directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.dpi = quality.dpi();
        self
    }

    pub fn with_page_range(mut self, range: PageRange) -> Self {
        self.page_range = Some(range);
        self
    }

    /// Output directory, defaulting to the source's parent.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| parent_dir(&self.input_path))
    }

    /// Source file name without extension.
    pub fn document_stem(&self) -> String {
        document_stem(&self.input_path)
    }
}

/// A multi-document conversion request. Always converts every page.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// Source PDFs, processed in order.
    pub input_paths: Vec<PathBuf>,

    /// Each document is written into `output_root/<stem>/`.
    pub output_root: PathBuf,

    pub format: OutputFormat,

    pub dpi: u32,
}

impl BatchRequest {
    pub fn new<I, P>(input_paths: I, output_root: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            input_paths: input_paths.into_iter().map(Into::into).collect(),
            output_root: output_root.into(),
            format: OutputFormat::default(),
            dpi: DEFAULT_DPI,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Per-document request for the document at `input_path`.
    pub fn document_request(&self, input_path: &Path) -> ConversionRequest {
        ConversionRequest {
            input_path: input_path.to_path_buf(),
            output_dir: Some(self.output_root.join(document_stem(input_path))),
            format: self.format,
            dpi: self.dpi,
            page_range: None,
        }
    }
}

/// File name without extension, used for output naming and batch folders.
pub fn document_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

/// Parent directory of `path`; `.` when it has none.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `<stem>_page_<NNN>.<ext>` with the 1-based page number padded to 3 digits.
pub fn output_file_name(stem: &str, page_number: usize, format: OutputFormat) -> String {
    format!("{}_page_{:03}.{}", stem, page_number, format.extension())
}
