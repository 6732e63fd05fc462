use crate::{AgentError, AgentRequest, AgentResult};

/// Receives free-text status messages while the collaborator runs.
pub trait StatusSink {
    fn emit(&self, message: &str);
}

impl<F> StatusSink for F
where
    F: Fn(&str),
{
    fn emit(&self, message: &str) {
        self(message)
    }
}

/// The external long-running operation that generates a learning path.
///
/// `run` blocks until the operation finishes. Implementations call
/// `sink.emit` zero or more times on the caller's thread before returning.
/// `Ok(None)` means the collaborator produced no result bundle.
pub trait AgentRunner {
    fn run(
        &self,
        request: &AgentRequest,
        sink: &dyn StatusSink,
    ) -> Result<Option<AgentResult>, AgentError>;
}
