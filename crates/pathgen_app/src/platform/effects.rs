use std::io::Write;
use std::path::PathBuf;

use pathgen_core::{Effect, GenerateRequest, Msg, RunOutcome};
use pathgen_engine::{
    export_learning_path, AgentError, AgentRequest, AgentResult, AgentRunner, ScriptedAgentRunner,
    StatusSink,
};
use pathgen_logging::{pathgen_debug, pathgen_info, pathgen_warn, redacted};

use super::app::App;

/// Collaborator for `--dry-run`: a scripted walk through every milestone.
pub struct DryRunAgent;

impl AgentRunner for DryRunAgent {
    fn run(
        &self,
        request: &AgentRequest,
        sink: &dyn StatusSink,
    ) -> Result<Option<AgentResult>, AgentError> {
        ScriptedAgentRunner::demo_for(request).run(request, sink)
    }
}

pub struct EffectRunner {
    runner: Box<dyn AgentRunner>,
    export_dir: Option<PathBuf>,
}

impl EffectRunner {
    pub fn new(runner: Box<dyn AgentRunner>, export_dir: Option<PathBuf>) -> Self {
        Self { runner, export_dir }
    }

    pub fn execute<O: Write, E: Write>(&self, effect: Effect, app: &App<O, E>) {
        match effect {
            Effect::RunAgent(request) => {
                let request = map_request(request);
                pathgen_info!(
                    "RunAgent api_key={} youtube_url_len={} drive={} notion={} goal_len={}",
                    redacted(&request.google_api_key),
                    request.youtube_pipedream_url.len(),
                    request.drive_pipedream_url.is_some(),
                    request.notion_pipedream_url.is_some(),
                    request.user_goal.len()
                );
                // Statuses are dispatched synchronously, on this thread, mid-run.
                let sink = |message: &str| app.dispatch(Msg::AgentStatus(message.to_string()));
                let outcome = map_outcome(self.runner.run(&request, &sink));
                app.dispatch(Msg::AgentFinished(outcome));
            }
            Effect::PathReady { goal, messages } => {
                let Some(dir) = self.export_dir.as_deref() else {
                    pathgen_debug!("No output dir configured; skipping export");
                    return;
                };
                let report = match export_learning_path(dir, &goal, &messages) {
                    Ok(path) => app.renderer().exported(&path),
                    Err(err) => {
                        pathgen_warn!("Export to {:?} failed: {}", dir, err);
                        app.renderer().export_failed(&err)
                    }
                };
                if let Err(err) = report {
                    pathgen_warn!("Failed to report export result: {}", err);
                }
            }
        }
    }
}

fn map_request(request: GenerateRequest) -> AgentRequest {
    AgentRequest {
        google_api_key: request.google_api_key,
        youtube_pipedream_url: request.youtube_url,
        drive_pipedream_url: request.drive_url,
        notion_pipedream_url: request.notion_url,
        user_goal: request.user_goal,
    }
}

fn map_outcome(result: Result<Option<AgentResult>, AgentError>) -> RunOutcome {
    match result {
        Ok(Some(AgentResult {
            messages: Some(messages),
        })) => {
            pathgen_info!("Agent returned {} messages", messages.len());
            RunOutcome::Messages(messages.into_iter().map(|m| m.content).collect())
        }
        Ok(Some(AgentResult { messages: None })) | Ok(None) => {
            pathgen_warn!("Agent returned no result");
            RunOutcome::NoResult
        }
        Err(err) => {
            pathgen_warn!("Agent run failed: {}", err);
            RunOutcome::Failed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_without_messages_maps_to_no_result() {
        assert_eq!(
            map_outcome(Ok(Some(AgentResult { messages: None }))),
            RunOutcome::NoResult
        );
        assert_eq!(map_outcome(Ok(None)), RunOutcome::NoResult);
    }

    #[test]
    fn contents_keep_their_order() {
        assert_eq!(
            map_outcome(Ok(Some(AgentResult::from_contents(["a", "b"])))),
            RunOutcome::Messages(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn errors_carry_their_display_text() {
        assert_eq!(
            map_outcome(Err(AgentError::HttpStatus(503))),
            RunOutcome::Failed("agent returned http status 503".to_string())
        );
    }
}
