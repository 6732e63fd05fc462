/// How a collaborator invocation ended, as seen by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A result bundle carrying a messages field (possibly empty).
    Messages(Vec<String>),
    /// No result bundle, or one without a messages field.
    NoResult,
    /// The collaborator failed; carries the error text.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the API key field.
    ApiKeyChanged(String),
    /// User edited the YouTube URL field.
    YoutubeUrlChanged(String),
    /// User picked a secondary tool.
    SecondaryToolSelected(crate::SecondaryTool),
    /// User edited the URL field of the selected secondary tool.
    SecondaryUrlChanged(String),
    /// User edited the learning goal.
    GoalChanged(String),
    /// User clicked Generate.
    GenerateClicked,
    /// Collaborator reported a status line during a run.
    AgentStatus(String),
    /// Collaborator returned or failed.
    AgentFinished(RunOutcome),
    /// Fallback for placeholder wiring.
    NoOp,
}
