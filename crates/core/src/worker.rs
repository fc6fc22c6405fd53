//! One-shot background conversion for interactive front-ends.
//!
//! A job runs on its own thread. Log lines stream back over a crossbeam
//! channel and the final result is handed over exactly once through a
//! oneshot channel, so the UI thread never blocks on rendering.

use crate::config::{BatchRequest, ConversionRequest};
use crate::converter::Converter;
use crate::error::{ConversionError, Result};
use crate::pdf_renderer::PdfBackend;
use crate::progress::ChannelSink;
use crossbeam_channel::Receiver;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

/// Work handed to the background thread.
#[derive(Debug, Clone)]
pub enum ConversionJob {
    Single(ConversionRequest),
    Batch(BatchRequest),
}

impl ConversionJob {
    /// Number of source documents in the job.
    pub fn document_count(&self) -> usize {
        match self {
            ConversionJob::Single(_) => 1,
            ConversionJob::Batch(batch) => batch.input_paths.len(),
        }
    }
}

/// Handle to a running conversion.
pub struct ConversionHandle {
    messages: Receiver<String>,
    result: oneshot::Receiver<Result<Vec<PathBuf>>>,
}

impl ConversionHandle {
    /// Drain log lines produced so far.
    pub fn try_messages(&self) -> Vec<String> {
        self.messages.try_iter().collect()
    }

    /// Poll for the final result without blocking.
    ///
    /// Returns `None` while the job is still running.
    pub fn try_result(&mut self) -> Option<Result<Vec<PathBuf>>> {
        match self.result.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ConversionError::WorkerLost)),
        }
    }

    /// Block until the job finishes. Must not be called from async code.
    pub fn wait(self) -> Result<Vec<PathBuf>> {
        self.result.blocking_recv()?
    }

    /// Await the job's result.
    pub async fn result(self) -> Result<Vec<PathBuf>> {
        self.result.await?
    }

    /// Receiver for log lines, for front-ends that select over channels.
    pub fn messages(&self) -> &Receiver<String> {
        &self.messages
    }
}

/// Run `job` on a background thread.
pub fn spawn_conversion<B>(converter: Arc<Converter<B>>, job: ConversionJob) -> ConversionHandle
where
    B: PdfBackend + 'static,
{
    let (msg_tx, msg_rx) = crossbeam_channel::unbounded();
    let (result_tx, result_rx) = oneshot::channel();

    std::thread::spawn(move || {
        let sink = ChannelSink::new(msg_tx);
        debug!("Background conversion started for {} documents", job.document_count());
        let result = match &job {
            ConversionJob::Single(request) => converter.convert(request, Some(&sink)),
            ConversionJob::Batch(request) => converter.convert_batch(request, Some(&sink)),
        };
        // The receiver may have been dropped if the front-end went away.
        let _ = result_tx.send(result);
    });

    ConversionHandle {
        messages: msg_rx,
        result: result_rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::converter::tests::{touch, FakeBackend};
    use tempfile::TempDir;

    fn converter(backend: FakeBackend) -> Arc<Converter<FakeBackend>> {
        Arc::new(Converter::with_backend(backend, RenderConfig::default()).unwrap())
    }

    #[test]
    fn test_single_job_delivers_result_and_messages() {
        let temp = TempDir::new().unwrap();
        let pdf = touch(temp.path(), "doc.pdf");
        let converter = converter(FakeBackend::default().with_document(&pdf, 2));

        let handle = spawn_conversion(
            converter,
            ConversionJob::Single(ConversionRequest::new(&pdf).with_dpi(72)),
        );
        let messages = handle.messages().clone();
        let outputs = handle.wait().unwrap();

        assert_eq!(outputs.len(), 2);
        let lines: Vec<String> = messages.try_iter().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Saved: "));
    }

    #[test]
    fn test_error_is_handed_back() {
        let temp = TempDir::new().unwrap();
        let converter = converter(FakeBackend::default());

        let handle = spawn_conversion(
            converter,
            ConversionJob::Single(ConversionRequest::new(temp.path().join("missing.pdf"))),
        );

        assert!(matches!(
            handle.wait(),
            Err(ConversionError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_try_result_eventually_completes() {
        let temp = TempDir::new().unwrap();
        let pdf = touch(temp.path(), "doc.pdf");
        let converter = converter(FakeBackend::default().with_document(&pdf, 1));

        let mut handle = spawn_conversion(
            converter,
            ConversionJob::Batch(
                BatchRequest::new([pdf.clone()], temp.path().join("out")).with_dpi(72),
            ),
        );

        let result = loop {
            if let Some(result) = handle.try_result() {
                break result;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        };
        assert_eq!(result.unwrap().len(), 1);
        assert!(handle
            .try_messages()
            .iter()
            .any(|line| line.contains("Finished: doc.pdf (1 files)")));
    }

    #[tokio::test]
    async fn test_result_can_be_awaited() {
        let temp = TempDir::new().unwrap();
        let pdf = touch(temp.path(), "doc.pdf");
        let converter = converter(FakeBackend::default().with_document(&pdf, 3));

        let handle = spawn_conversion(
            converter,
            ConversionJob::Single(ConversionRequest::new(&pdf).with_dpi(72)),
        );

        assert_eq!(handle.result().await.unwrap().len(), 3);
    }

    #[test]
    fn test_job_document_count() {
        let single = ConversionJob::Single(ConversionRequest::new("a.pdf"));
        let batch = ConversionJob::Batch(BatchRequest::new(["a.pdf", "b.pdf"], "/out"));
        assert_eq!(single.document_count(), 1);
        assert_eq!(batch.document_count(), 2);
    }
}
