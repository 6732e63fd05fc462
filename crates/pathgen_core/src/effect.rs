/// Validated fields handed to the collaborator.
///
/// Exactly one of `drive_url` / `notion_url` is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub google_api_key: String,
    pub youtube_url: String,
    pub drive_url: Option<String>,
    pub notion_url: Option<String>,
    pub user_goal: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Invoke the collaborator synchronously, feeding its statuses back as
    /// `Msg::AgentStatus` and its result as `Msg::AgentFinished`.
    RunAgent(GenerateRequest),
    /// A run produced a learning path; the shell may persist it.
    PathReady { goal: String, messages: Vec<String> },
}
