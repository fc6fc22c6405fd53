//! # pdf-to-image-core
//!
//! PDF to PNG/JPEG/TIFF page conversion.
//!
//! Pages are rasterized with **pdfium** (Google's PDF engine) and written
//! with the `image` and `png` crates. A single document can be converted
//! in full or by page range; a batch of documents is written into one
//! subfolder per document.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_to_image_core::{Converter, ConversionRequest, OutputFormat, Quality, RenderConfig};
//!
//! fn main() -> pdf_to_image_core::Result<()> {
//!     let converter = Converter::new(RenderConfig::default())?;
//!
//!     let request = ConversionRequest::new("document.pdf")
//!         .with_output_dir("./output")
//!         .with_format(OutputFormat::Png)
//!         .with_quality(Quality::HighDefinition);
//!     let files = converter.convert(&request, None)?;
//!
//!     println!("Wrote {} images", files.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Batch Processing in the Background
//!
//! ```rust,no_run
//! use pdf_to_image_core::{spawn_conversion, BatchRequest, ConversionJob, Converter, RenderConfig};
//! use std::sync::Arc;
//!
//! fn main() -> pdf_to_image_core::Result<()> {
//!     let converter = Arc::new(Converter::new(RenderConfig::default())?);
//!     let job = ConversionJob::Batch(BatchRequest::new(["a.pdf", "b.pdf"], "./output"));
//!
//!     let handle = spawn_conversion(converter, job);
//!     for line in handle.messages().iter() {
//!         println!("{}", line);
//!     }
//!     let files = handle.wait()?;
//!     println!("Total: {} images", files.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod converter;
pub mod encoder;
pub mod error;
pub mod pdf_renderer;
pub mod progress;
pub mod session;
pub mod worker;

// Re-export main types for convenience
pub use config::{
    output_file_name, quality_to_dpi, scale_factor, BatchRequest, ConversionRequest,
    OutputFormat, PageRange, Quality, RenderConfig,
};
pub use converter::Converter;
pub use error::{ConversionError, Result};
pub use pdf_renderer::{PdfBackend, PdfiumBackend, RasterDocument};
pub use progress::{ChannelSink, ProgressEvent, ProgressSink, StdoutSink, TracingSink};
pub use session::{OutputMode, RangeMode, RangeView, Session, SessionError, SourceList};
pub use worker::{spawn_conversion, ConversionHandle, ConversionJob};

/// Initialize the library's logging.
/// Call this once at application startup if you want to see logs.
///
/// `RUST_LOG` takes precedence over `default_directive`.
pub fn init_logging(default_directive: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
