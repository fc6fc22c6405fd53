use console::{Style, Term};
use pdf_to_image_core::{ProgressEvent, ProgressSink, TracingSink};

/// Writes conversion progress to the terminal and mirrors it to the log.
#[derive(Debug, Clone)]
pub struct TermReporter {
    term: Term,
    log: TracingSink,
}

impl TermReporter {
    pub fn new(term: Term) -> Self {
        Self {
            term,
            log: TracingSink,
        }
    }
}

impl ProgressSink for TermReporter {
    fn report(&self, event: &ProgressEvent) {
        let line = match event {
            ProgressEvent::PageFailed { .. } | ProgressEvent::DocumentMissing { .. } => {
                Style::new().yellow().apply_to(event).to_string()
            }
            ProgressEvent::DocumentFailed { .. } => Style::new().red().apply_to(event).to_string(),
            ProgressEvent::DocumentCompleted { .. } => {
                Style::new().green().apply_to(event).to_string()
            }
            _ => event.to_string(),
        };
        let _ = self.term.write_line(&line);
        self.log.report(event);
    }
}
