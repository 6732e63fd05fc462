//! Pathgen core: pure form/progress state machine and view-model helpers.
mod effect;
mod msg;
mod progress;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::{Effect, GenerateRequest};
pub use msg::{Msg, RunOutcome};
pub use progress::{ProgressStage, ProgressState};
pub use state::{AppState, FormState, SecondaryTool};
pub use update::update;
pub use validate::validate;
pub use view_model::{AppViewModel, Notice, Severity};
