//! Handlers reacting to domain events

mod customer;
mod product;

pub use customer::{ConsoleLogAddressHandler, FirstConsoleLogHandler, SecondConsoleLogHandler};
pub use product::SendEmailWhenProductIsCreatedHandler;

use std::sync::{Arc, Mutex, PoisonError};

/// Shared record of the lines handlers have emitted.
///
/// Handlers always write to the log output; a sink additionally keeps the
/// lines in memory, in emission order, for callers that need to inspect them.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, line: impl Into<String>) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.into());
    }

    /// Snapshot of the recorded lines
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

pub(crate) fn emit(target: &str, sink: Option<&MessageLog>, line: String) {
    tidings_log::info!(target: target, "{}", line);
    if let Some(sink) = sink {
        sink.record(line);
    }
}
