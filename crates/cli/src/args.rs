use clap::*;
use pdf_to_image_core::{OutputFormat, Quality};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert PDF pages to PNG, JPEG or TIFF images")]
pub struct CliArgs {
    #[arg(required = true, help = "PDF files to convert (one or more)")]
    pub sources: Vec<PathBuf>,

    #[arg(
        short = 'o',
        long,
        help = "Output directory (default: the directory of the first PDF)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        ignore_case = true,
        default_value_t = FormatArg::Png,
        help = "Output image format"
    )]
    pub format: FormatArg,

    #[arg(
        short = 'q',
        long,
        value_enum,
        default_value_t = QualityArg::Clear,
        help = "Image quality preset"
    )]
    pub quality: QualityArg,

    #[arg(short = 'd', long, help = "Custom DPI from 1 to 2400 (overrides --quality)")]
    pub dpi: Option<u32>,

    #[arg(
        long,
        help = "Page range such as 1-5 or 3, single file only"
    )]
    pub pages: Option<String>,

    #[arg(long, help = "Directory containing the pdfium library")]
    pub pdfium_lib: Option<PathBuf>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Png,
    #[value(alias = "jpg")]
    Jpeg,
    #[value(alias = "tif")]
    Tiff,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Tiff => OutputFormat::Tiff,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityArg {
    /// 150 DPI
    General,
    /// 200 DPI
    Clear,
    /// 300 DPI
    #[value(alias = "high-definition")]
    Hd,
    /// 600 DPI
    Print,
}

impl From<QualityArg> for Quality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::General => Quality::General,
            QualityArg::Clear => Quality::Clear,
            QualityArg::Hd => Quality::HighDefinition,
            QualityArg::Print => Quality::Print,
        }
    }
}

impl CliArgs {
    pub fn is_batch(&self) -> bool {
        self.sources.len() > 1
    }

    /// DPI to render at: `--dpi` wins over `--quality`.
    pub fn resolved_dpi(&self) -> u32 {
        self.dpi
            .unwrap_or_else(|| Quality::from(self.quality).dpi())
    }
}
