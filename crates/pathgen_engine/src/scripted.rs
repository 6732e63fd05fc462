use pathgen_logging::pathgen_info;

use crate::{AgentError, AgentRequest, AgentResult, AgentRunner, StatusSink};

/// Status messages a full agent run emits, in order, for a Drive setup.
pub const MILESTONE_STATUSES: [&str; 5] = [
    "Setting up agent with tools: youtube, drive",
    "Added Google Drive integration",
    "Creating AI agent",
    "Generating your learning path",
    "Learning path generation complete",
];

/// Collaborator that replays a fixed script. Used for dry runs and tests.
#[derive(Debug, Clone)]
pub struct ScriptedAgentRunner {
    statuses: Vec<String>,
    outcome: Result<Option<AgentResult>, AgentError>,
}

impl ScriptedAgentRunner {
    pub fn new<I, S>(statuses: I, outcome: Result<Option<AgentResult>, AgentError>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            statuses: statuses.into_iter().map(Into::into).collect(),
            outcome,
        }
    }

    /// Walks through every milestone for the integration the request names
    /// and returns a short placeholder plan for its goal.
    pub fn demo_for(request: &AgentRequest) -> Self {
        let (tools, integration) = if request.notion_pipedream_url.is_some() {
            ("youtube, notion", "Added Notion integration")
        } else {
            ("youtube, drive", "Added Google Drive integration")
        };
        let statuses = vec![
            format!("Setting up agent with tools: {tools}"),
            integration.to_string(),
            MILESTONE_STATUSES[2].to_string(),
            MILESTONE_STATUSES[3].to_string(),
            MILESTONE_STATUSES[4].to_string(),
        ];
        let goal = request.user_goal.trim();
        let plan = AgentResult::from_contents([
            format!("Day 1: survey the fundamentals of {goal}"),
            format!("Day 2: follow a hands-on tutorial about {goal}"),
            format!("Day 3: build a small project applying {goal}"),
        ]);
        Self::new(statuses, Ok(Some(plan)))
    }
}

impl AgentRunner for ScriptedAgentRunner {
    fn run(
        &self,
        _request: &AgentRequest,
        sink: &dyn StatusSink,
    ) -> Result<Option<AgentResult>, AgentError> {
        pathgen_info!("Replaying {} scripted statuses", self.statuses.len());
        for status in &self.statuses {
            sink.emit(status);
        }
        self.outcome.clone()
    }
}
