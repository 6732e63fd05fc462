use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fields forwarded to the collaborator.
///
/// Exactly one of `drive_pipedream_url` / `notion_pipedream_url` is set.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AgentRequest {
    pub google_api_key: String,
    pub youtube_pipedream_url: String,
    pub drive_pipedream_url: Option<String>,
    pub notion_pipedream_url: Option<String>,
    pub user_goal: String,
}

// Hand-written so the key never ends up in logs or panic messages.
impl std::fmt::Debug for AgentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRequest")
            .field(
                "google_api_key",
                &pathgen_logging::redacted(&self.google_api_key),
            )
            .field("youtube_pipedream_url", &self.youtube_pipedream_url)
            .field("drive_pipedream_url", &self.drive_pipedream_url)
            .field("notion_pipedream_url", &self.notion_pipedream_url)
            .field("user_goal", &self.user_goal)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub content: String,
}

/// Result bundle returned by the collaborator.
///
/// `messages` is `None` when the bundle carried no messages field at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgentResult {
    #[serde(default)]
    pub messages: Option<Vec<AgentMessage>>,
}

impl AgentResult {
    pub fn from_contents<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: Some(
                contents
                    .into_iter()
                    .map(|content| AgentMessage {
                        content: content.into(),
                    })
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("invalid agent url: {0}")]
    InvalidUrl(String),
    #[error("agent returned http status {0}")]
    HttpStatus(u16),
    #[error("agent request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed agent response: {0}")]
    Protocol(String),
    /// Failure reported by the agent itself; displayed verbatim.
    #[error("{0}")]
    Agent(String),
    #[error("could not start agent runtime: {0}")]
    Runtime(String),
}
