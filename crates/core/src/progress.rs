//! Progress reporting.
//!
//! Converters report what they do through a [`ProgressSink`]. The CLI prints
//! events to stdout, while an interactive front-end forwards them through a
//! [`ChannelSink`] so the log view can be updated from the UI thread.

use crossbeam_channel::Sender;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// A single progress message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A page image was written.
    PageSaved { page: usize, path: PathBuf },
    /// A page failed to render or encode and was skipped.
    PageFailed { page: usize, message: String },
    /// A batch run started.
    BatchStarted { total_files: usize },
    /// A document in a batch started converting.
    DocumentStarted { file_name: String },
    /// A document in a batch finished.
    DocumentCompleted { file_name: String, files: usize },
    /// A document in a batch failed and was skipped.
    DocumentFailed { file_name: String, message: String },
    /// A document in a batch does not exist and was skipped.
    DocumentMissing { path: PathBuf },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::PageSaved { path, .. } => write!(f, "Saved: {}", path.display()),
            ProgressEvent::PageFailed { page, message } => {
                write!(f, "Failed to save page {}: {}", page, message)
            }
            ProgressEvent::BatchStarted { total_files } => {
                write!(f, "Starting batch conversion of {} PDF files", total_files)
            }
            ProgressEvent::DocumentStarted { file_name } => {
                write!(f, "Converting: {}", file_name)
            }
            ProgressEvent::DocumentCompleted { file_name, files } => {
                write!(f, "Finished: {} ({} files)", file_name, files)
            }
            ProgressEvent::DocumentFailed { file_name, message } => {
                write!(f, "Conversion failed for {}: {}", file_name, message)
            }
            ProgressEvent::DocumentMissing { path } => {
                write!(f, "PDF file not found: {}", path.display())
            }
        }
    }
}

/// Something that accepts progress messages.
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn report(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Prints each event on its own line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ProgressSink for StdoutSink {
    fn report(&self, event: &ProgressEvent) {
        println!("{}", event);
    }
}

/// Forwards events to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn report(&self, event: &ProgressEvent) {
        info!("{}", event);
    }
}

/// Sends rendered messages over a channel.
///
/// A closed receiver is ignored: the conversion keeps running even if
/// nobody is listening any more.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: Sender<String>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn report(&self, event: &ProgressEvent) {
        let _ = self.tx.send(event.to_string());
    }
}
