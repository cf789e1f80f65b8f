//! Output boundary between the core and whatever displays its results.
//!
//! Every request ends in exactly one call: `on_success` with a primitive
//! projection, or `on_failure` with a human-readable message. Errors never
//! cross this boundary as values.

use tracing::warn;

use crate::error::Result;

/// Receives the outcome of a request.
pub trait OutputBoundary<T> {
    fn on_success(&mut self, output: T);
    fn on_failure(&mut self, message: String);
}

/// Captures an outcome for later inspection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Presented<T> {
    /// Nothing has been presented yet.
    #[default]
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> Presented<T> {
    pub fn new() -> Self {
        Presented::Pending
    }

    /// The successful output, if any.
    pub fn output(&self) -> Option<&T> {
        match self {
            Presented::Succeeded(output) => Some(output),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Presented::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Convert into a plain result. A pending outcome is reported as a
    /// failure.
    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            Presented::Succeeded(output) => Ok(output),
            Presented::Failed(message) => Err(message),
            Presented::Pending => Err("no outcome was presented".to_string()),
        }
    }
}

impl<T> OutputBoundary<T> for Presented<T> {
    fn on_success(&mut self, output: T) {
        *self = Presented::Succeeded(output);
    }

    fn on_failure(&mut self, message: String) {
        *self = Presented::Failed(message);
    }
}

/// Funnel a result into a presenter.
pub fn present<T>(result: Result<T>, presenter: &mut dyn OutputBoundary<T>) {
    match result {
        Ok(output) => presenter.on_success(output),
        Err(err) => {
            warn!(error = %err, "request failed");
            presenter.on_failure(err.to_string());
        }
    }
}
