use crate::args::CliArgs;
use crate::reporter::TermReporter;
use console::{Style, Term};
use pdf_to_image_core::config::parent_dir;
use pdf_to_image_core::{
    BatchRequest, ConversionError, ConversionRequest, Converter, OutputFormat, PageRange, Quality,
    RenderConfig, Result,
};
use std::path::PathBuf;
use tracing::debug;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub output_paths: Vec<PathBuf>,
    pub batch: bool,
}

/// Validated options for one CLI invocation.
#[derive(Debug, Clone)]
pub struct ConvertPlan {
    pub sources: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub dpi: u32,
    pub page_range: Option<PageRange>,
}

impl ConvertPlan {
    /// Resolve arguments, printing the same notices the interactive tool
    /// shows. A malformed page range is an error; a range given with more
    /// than one source is ignored with a warning.
    pub fn from_args(args: &CliArgs, term: &Term) -> Result<Self> {
        let warn_style = Style::new().yellow();

        let pages = match &args.pages {
            Some(_) if args.is_batch() => {
                let _ = term.write_line(
                    &warn_style
                        .apply_to("Warning: page ranges are not supported with multiple files, converting all pages")
                        .to_string(),
                );
                None
            }
            other => other.as_deref(),
        };

        let dpi = args.resolved_dpi();
        RenderConfig::validate_dpi(dpi)?;
        let _ = match args.dpi {
            Some(dpi) => term.write_line(&format!("Using custom DPI: {}", dpi)),
            None => term.write_line(&format!(
                "Using quality: {} ({} DPI)",
                Quality::from(args.quality),
                dpi
            )),
        };

        let page_range = pages.map(str::parse::<PageRange>).transpose()?;

        Ok(Self {
            sources: args.sources.clone(),
            output: args.output.clone(),
            format: args.format.into(),
            dpi,
            page_range,
        })
    }

    pub fn is_batch(&self) -> bool {
        self.sources.len() > 1
    }

    /// Single-document request, or `None` in batch mode.
    pub fn single_request(&self) -> Option<ConversionRequest> {
        match self.sources.as_slice() {
            [source] => {
                let mut request = ConversionRequest::new(source)
                    .with_format(self.format)
                    .with_dpi(self.dpi);
                request.output_dir = self.output.clone();
                request.page_range = self.page_range;
                Some(request)
            }
            _ => None,
        }
    }

    /// Batch request; the output root defaults to the first source's directory.
    pub fn batch_request(&self) -> BatchRequest {
        let output_root = self.output.clone().unwrap_or_else(|| {
            self.sources
                .first()
                .map(|p| parent_dir(p))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        BatchRequest::new(self.sources.iter().cloned(), output_root)
            .with_format(self.format)
            .with_dpi(self.dpi)
    }
}

pub fn command_convert(args: &CliArgs, term: &Term) -> Result<ConvertSummary> {
    debug!("Arguments: {:?}", args);
    let plan = ConvertPlan::from_args(args, term)?;

    // Batch mode reports and skips missing files; a lone source must exist
    // before pdfium is bound.
    if let [source] = plan.sources.as_slice() {
        if !source.exists() {
            return Err(ConversionError::InputNotFound(source.clone()));
        }
    }

    let mut config = RenderConfig::default();
    if let Some(dir) = &args.pdfium_lib {
        config = config.pdfium_library_path(dir);
    }
    let converter = Converter::new(config)?;
    let reporter = TermReporter::new(term.clone());

    let output_paths = match plan.single_request() {
        Some(request) => converter.convert(&request, Some(&reporter))?,
        None => converter.convert_batch(&plan.batch_request(), Some(&reporter))?,
    };

    Ok(ConvertSummary {
        output_paths,
        batch: plan.is_batch(),
    })
}
