use crate::{validate, AppState, Effect, Msg, Notice, RunOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ApiKeyChanged(value) => {
            state.form_mut().google_api_key = value;
            Vec::new()
        }
        Msg::YoutubeUrlChanged(value) => {
            state.form_mut().youtube_url = value;
            Vec::new()
        }
        Msg::SecondaryToolSelected(tool) => {
            state.form_mut().select_secondary(tool);
            Vec::new()
        }
        Msg::SecondaryUrlChanged(value) => {
            state.form_mut().set_secondary_url(value);
            Vec::new()
        }
        Msg::GoalChanged(value) => {
            state.form_mut().user_goal = value;
            Vec::new()
        }
        Msg::GenerateClicked => {
            // The trigger is disabled mid-run; a click that still arrives is dropped.
            if state.is_generating() {
                return (state, Vec::new());
            }
            state.clear_results();
            match validate(state.form()) {
                Ok(request) => {
                    state.begin_run();
                    vec![Effect::RunAgent(request)]
                }
                Err(notice) => {
                    state.push_notice(notice);
                    Vec::new()
                }
            }
        }
        Msg::AgentStatus(message) => {
            state.apply_status(&message);
            Vec::new()
        }
        Msg::AgentFinished(outcome) => finish(&mut state, outcome),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn finish(state: &mut AppState, outcome: RunOutcome) -> Vec<Effect> {
    match outcome {
        RunOutcome::Messages(messages) if !messages.is_empty() => {
            state.push_notice(Notice::success("Your learning path is ready!"));
            state.finish_run(messages.clone());
            vec![Effect::PathReady {
                goal: state.form().user_goal.clone(),
                messages,
            }]
        }
        RunOutcome::Messages(_) | RunOutcome::NoResult => {
            state.push_notice(Notice::error("No results were generated"));
            state.finish_run(Vec::new());
            Vec::new()
        }
        RunOutcome::Failed(text) => {
            state.push_notice(Notice::error(format!("Error: {text}")));
            state.finish_run(Vec::new());
            Vec::new()
        }
    }
}
