//! Newline-delimited JSON events streamed back by the agent service.
//!
//! Each non-blank line is one object: `{"status": ".."}`, `{"error": ".."}`,
//! or a result bundle such as `{"messages": [{"content": ".."}]}`.

use bytes::{Buf, BytesMut};
use serde_json::Value;

use crate::{AgentError, AgentResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WireEvent {
    Status(String),
    Error(String),
    Result(AgentResult),
}

pub(crate) fn parse_line(line: &str) -> Result<Option<WireEvent>, AgentError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let value: Value =
        serde_json::from_str(line).map_err(|err| AgentError::Protocol(err.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(AgentError::Protocol(format!("expected an object, got {line}")));
    };

    if let Some(status) = object.remove("status") {
        return text_field("status", status).map(|text| Some(WireEvent::Status(text)));
    }
    if let Some(error) = object.remove("error") {
        return text_field("error", error).map(|text| Some(WireEvent::Error(text)));
    }
    let result: AgentResult = serde_json::from_value(Value::Object(object))
        .map_err(|err| AgentError::Protocol(err.to_string()))?;
    Ok(Some(WireEvent::Result(result)))
}

fn text_field(name: &str, value: Value) -> Result<String, AgentError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(AgentError::Protocol(format!(
            "field `{name}` must be a string, got {other}"
        ))),
    }
}

/// Splits an arbitrary chunking of the body back into lines.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    pending: BytesMut,
}

impl LineBuffer {
    pub(crate) fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Pops the next complete line, without its terminator.
    pub(crate) fn next_line(&mut self) -> Result<Option<String>, AgentError> {
        let Some(pos) = self.pending.iter().position(|b| *b == b'\n') else {
            return Ok(None);
        };
        let line = self.pending.split_to(pos);
        self.pending.advance(1);
        decode(&line).map(Some)
    }

    /// Drains whatever is left once the body has ended.
    pub(crate) fn finish(&mut self) -> Result<Option<String>, AgentError> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        let rest = self.pending.split();
        decode(&rest).map(Some)
    }
}

fn decode(raw: &[u8]) -> Result<String, AgentError> {
    String::from_utf8(raw.to_vec()).map_err(|err| AgentError::Protocol(err.to_string()))
}
