//! Converter that turns PDF documents into page images on disk.
//!
//! [`Converter::convert`] handles one document and tolerates individual page
//! failures. [`Converter::convert_batch`] runs many documents, each into its
//! own subfolder, and tolerates individual document failures.

use crate::config::{
    output_file_name, scale_factor, BatchRequest, ConversionRequest, RenderConfig,
};
use crate::encoder::encode_page;
use crate::error::{ConversionError, Result};
use crate::pdf_renderer::{PdfBackend, PdfiumBackend, RasterDocument};
use crate::progress::{ProgressEvent, ProgressSink, StdoutSink};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Converts PDF documents to images using a [`PdfBackend`].
pub struct Converter<B = PdfiumBackend> {
    backend: B,
    config: RenderConfig,
}

impl Converter<PdfiumBackend> {
    /// Create a converter backed by pdfium.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        let backend = PdfiumBackend::new(&config)?;
        Ok(Self { backend, config })
    }
}

impl<B: PdfBackend> Converter<B> {
    /// Create a converter with a custom backend.
    pub fn with_backend(backend: B, config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of pages in the document at `path`.
    pub fn page_count(&self, path: &Path) -> Result<usize> {
        if !path.exists() {
            return Err(ConversionError::InputNotFound(path.to_path_buf()));
        }
        let document = self.open(path)?;
        Ok(document.page_count())
    }

    /// Convert one document. Returns the written files in page order.
    ///
    /// Pages that fail to render or write are reported through `sink` and
    /// left out of the result. Without a sink, messages go to stdout.
    pub fn convert(
        &self,
        request: &ConversionRequest,
        sink: Option<&dyn ProgressSink>,
    ) -> Result<Vec<PathBuf>> {
        let sink = sink.unwrap_or(&StdoutSink);
        let start = Instant::now();
        let input_path = &request.input_path;

        RenderConfig::validate_dpi(request.dpi)?;
        if !input_path.exists() {
            return Err(ConversionError::InputNotFound(input_path.clone()));
        }

        let output_dir = request.resolved_output_dir();
        std::fs::create_dir_all(&output_dir).map_err(|e| ConversionError::OutputDirError {
            path: output_dir.clone(),
            message: e.to_string(),
        })?;

        info!("Converting {:?} at {} DPI", input_path, request.dpi);

        let document = self.open(input_path)?;
        let page_count = document.page_count();
        let span = match &request.page_range {
            Some(range) => range.index_span(page_count),
            None => 0..page_count,
        };
        debug!(
            "Rendering pages {:?} of {} from {:?}",
            span, page_count, input_path
        );

        let scale = scale_factor(request.dpi);
        let stem = request.document_stem();
        let mut output_paths = Vec::with_capacity(span.len());

        for page_idx in span {
            let page_number = page_idx + 1;
            let output_path = output_dir.join(output_file_name(&stem, page_number, request.format));

            match self.write_page(document.as_ref(), page_idx, scale, request, &output_path) {
                Ok(()) => {
                    sink.report(&ProgressEvent::PageSaved {
                        page: page_number,
                        path: output_path.clone(),
                    });
                    output_paths.push(output_path);
                }
                Err(e) => {
                    warn!("Page {} of {:?} failed: {}", page_number, input_path, e);
                    sink.report(&ProgressEvent::PageFailed {
                        page: page_number,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Converted {:?} to {} images in {:?}",
            input_path,
            output_paths.len(),
            start.elapsed()
        );

        Ok(output_paths)
    }

    /// Convert every page of every document into `output_root/<stem>/`.
    ///
    /// Missing documents and documents that fail to convert are reported and
    /// skipped. Returns all written files in input order.
    pub fn convert_batch(
        &self,
        request: &BatchRequest,
        sink: Option<&dyn ProgressSink>,
    ) -> Result<Vec<PathBuf>> {
        let sink = sink.unwrap_or(&StdoutSink);
        let start = Instant::now();
        let mut all_outputs = Vec::new();

        RenderConfig::validate_dpi(request.dpi)?;
        sink.report(&ProgressEvent::BatchStarted {
            total_files: request.input_paths.len(),
        });

        for input_path in &request.input_paths {
            if !input_path.exists() {
                warn!("Skipping missing PDF {:?}", input_path);
                sink.report(&ProgressEvent::DocumentMissing {
                    path: input_path.clone(),
                });
                continue;
            }

            let doc_request = request.document_request(input_path);
            let doc_dir = doc_request.resolved_output_dir();
            std::fs::create_dir_all(&doc_dir).map_err(|e| ConversionError::OutputDirError {
                path: doc_dir.clone(),
                message: e.to_string(),
            })?;

            let file_name = display_name(input_path);
            sink.report(&ProgressEvent::DocumentStarted {
                file_name: file_name.clone(),
            });

            match self.convert(&doc_request, Some(sink)) {
                Ok(outputs) => {
                    sink.report(&ProgressEvent::DocumentCompleted {
                        file_name,
                        files: outputs.len(),
                    });
                    all_outputs.extend(outputs);
                }
                Err(e) => {
                    error!("Failed to convert {:?}: {}", input_path, e);
                    sink.report(&ProgressEvent::DocumentFailed {
                        file_name,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Batch of {} documents produced {} images in {:?}",
            request.input_paths.len(),
            all_outputs.len(),
            start.elapsed()
        );

        Ok(all_outputs)
    }

    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn RasterDocument + 'a>> {
        self.backend.open(path).map_err(|e| match e {
            e @ ConversionError::ConversionFailed { .. } => e,
            other => ConversionError::ConversionFailed {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        })
    }

    fn write_page(
        &self,
        document: &dyn RasterDocument,
        page_idx: usize,
        scale: f32,
        request: &ConversionRequest,
        output_path: &Path,
    ) -> Result<()> {
        let image = document.render_page(page_idx, scale)?;
        let data = encode_page(&image, request.format, &self.config)?;
        std::fs::write(output_path, data)?;
        Ok(())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
