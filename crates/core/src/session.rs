//! Front-end state for interactive use.
//!
//! Holds the selected files and options of a desktop front-end as plain
//! values. Enablement of the page-range controls is derived by
//! [`RangeView::derive`] instead of being toggled from event handlers.

use crate::config::{parent_dir, BatchRequest, ConversionRequest, OutputFormat, PageRange, Quality};
use crate::worker::ConversionJob;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a session cannot start a conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No PDF files selected")]
    NoFiles,

    #[error("PDF file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Start page cannot be less than 1")]
    StartBelowOne,

    #[error("Start page cannot exceed the total page count ({total})")]
    StartPastEnd { total: usize },

    #[error("End page cannot be less than 1")]
    EndBelowOne,

    #[error("End page cannot exceed the total page count ({total})")]
    EndPastEnd { total: usize },

    #[error("Start page cannot be greater than end page")]
    StartAfterEnd,
}

/// Ordered, de-duplicated list of selected PDF files.
#[derive(Debug, Clone, Default)]
pub struct SourceList {
    paths: Vec<PathBuf>,
}

/// What happened to each path passed to [`SourceList::add`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: Vec<PathBuf>,
    pub duplicates: Vec<PathBuf>,
    pub rejected: Vec<PathBuf>,
}

impl SourceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add paths, skipping ones already present and non-PDF files.
    pub fn add<I, P>(&mut self, paths: I) -> AddOutcome
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut outcome = AddOutcome::default();
        for path in paths.into_iter().map(Into::into) {
            if !is_pdf(&path) {
                outcome.rejected.push(path);
            } else if self.paths.contains(&path) {
                outcome.duplicates.push(path);
            } else {
                self.paths.push(path.clone());
                outcome.added.push(path);
            }
        }
        outcome
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn first(&self) -> Option<&Path> {
        self.paths.first().map(PathBuf::as_path)
    }
}

/// `true` for paths ending in `.pdf`, in any case.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Where output images go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Next to the first selected file.
    #[default]
    SameAsSource,
    /// A chosen directory. `None` or an empty path falls back to the first
    /// file's directory.
    Custom(Option<PathBuf>),
}

impl OutputMode {
    /// Resolve the output directory for `first_source`.
    pub fn resolve(&self, first_source: &Path) -> PathBuf {
        match self {
            OutputMode::Custom(Some(dir)) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => parent_dir(first_source),
        }
    }
}

/// Page selection mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangeMode {
    #[default]
    All,
    Custom,
}

/// Derived state of the page-range controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeView {
    /// Effective mode after applying the multi-file rule.
    pub mode: RangeMode,
    /// Whether "custom" can be selected at all.
    pub custom_allowed: bool,
    /// Whether start/end inputs accept edits.
    pub fields_enabled: bool,
    /// Lowest selectable page.
    pub min: usize,
    /// Highest selectable page; 1 when the page count is unknown.
    pub max: usize,
}

impl RangeView {
    /// Derive control state from the number of files, the page count of the
    /// single selected file (if readable) and the requested mode.
    pub fn derive(file_count: usize, page_count: Option<usize>, requested: RangeMode) -> Self {
        let custom_allowed = file_count <= 1;
        let mode = if custom_allowed { requested } else { RangeMode::All };
        let max = match (file_count, page_count) {
            (1, Some(n)) if n > 0 => n,
            _ => 1,
        };
        Self {
            mode,
            custom_allowed,
            fields_enabled: file_count == 1 && mode == RangeMode::Custom,
            min: 1,
            max,
        }
    }

    /// Default values shown in the start/end fields.
    pub fn default_bounds(&self) -> (usize, usize) {
        (self.min, self.max)
    }
}

/// Everything a front-end has collected before starting a conversion.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub sources: SourceList,
    pub output: OutputMode,
    pub format: OutputFormat,
    pub quality: Quality,
    pub range_mode: RangeMode,
    /// Raw start/end as entered; validated by [`Session::validate`].
    pub range_input: (i64, i64),
    /// Page count of the single selected file, when known.
    pub total_pages: Option<usize>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            range_input: (1, 1),
            ..Default::default()
        }
    }

    /// Current page-range control state.
    pub fn range_view(&self) -> RangeView {
        RangeView::derive(self.sources.len(), self.total_pages, self.range_mode)
    }

    /// Record the page count of the selected file and reset the range
    /// fields the way the "all pages" mode shows them.
    pub fn set_total_pages(&mut self, total: Option<usize>) {
        self.total_pages = total;
        let view = self.range_view();
        if view.mode == RangeMode::All {
            let (start, end) = view.default_bounds();
            self.range_input = (start as i64, end as i64);
        } else if let Some(total) = total {
            let (start, end) = self.range_input;
            if start > total as i64 {
                self.range_input.0 = 1;
            }
            if end > total as i64 {
                self.range_input.1 = total as i64;
            }
        }
    }

    /// Reset to the initial state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Check that a conversion can start.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.sources.is_empty() {
            return Err(SessionError::NoFiles);
        }
        if let Some(missing) = self.sources.paths().iter().find(|p| !p.exists()) {
            return Err(SessionError::MissingFile(missing.clone()));
        }
        if self.range_view().mode == RangeMode::Custom {
            self.validated_range()?;
        }
        Ok(())
    }

    fn validated_range(&self) -> Result<PageRange, SessionError> {
        let (start, end) = self.range_input;
        let total = self.total_pages.unwrap_or(0) as i64;
        if start < 1 {
            return Err(SessionError::StartBelowOne);
        }
        if total > 0 && start > total {
            return Err(SessionError::StartPastEnd {
                total: total as usize,
            });
        }
        if end < 1 {
            return Err(SessionError::EndBelowOne);
        }
        if total > 0 && end > total {
            return Err(SessionError::EndPastEnd {
                total: total as usize,
            });
        }
        PageRange::new(start as usize, end as usize).map_err(|_| SessionError::StartAfterEnd)
    }

    /// Build the job for the background worker.
    pub fn job(&self) -> Result<ConversionJob, SessionError> {
        self.validate()?;
        let first = self.sources.first().ok_or(SessionError::NoFiles)?;
        let output_dir = self.output.resolve(first);
        let dpi = self.quality.dpi();

        if self.sources.len() == 1 {
            let mut request = ConversionRequest::new(first)
                .with_output_dir(output_dir)
                .with_format(self.format)
                .with_dpi(dpi);
            if self.range_view().mode == RangeMode::Custom {
                request = request.with_page_range(self.validated_range()?);
            }
            Ok(ConversionJob::Single(request))
        } else {
            Ok(ConversionJob::Batch(
                BatchRequest::new(self.sources.paths().iter().cloned(), output_dir)
                    .with_format(self.format)
                    .with_dpi(dpi),
            ))
        }
    }
}
