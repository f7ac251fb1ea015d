use crate::foundation::error::VizError;

/// Destination for user-visible invocation failures.
pub trait FailureReporter {
    /// Surface one failure.
    fn report(&mut self, err: &VizError);
}

/// Reporter that writes failures to the `tracing` error stream.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
    fn report(&mut self, err: &VizError) {
        tracing::error!(error = %err, "invocation failed");
    }
}

/// Reporter that keeps failure messages in memory.
#[derive(Clone, Debug, Default)]
pub struct CollectingReporter {
    messages: Vec<String>,
}

impl CollectingReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported so far, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Drop all collected messages and return them.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl FailureReporter for CollectingReporter {
    fn report(&mut self, err: &VizError) {
        self.messages.push(err.to_string());
    }
}
