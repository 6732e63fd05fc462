//! Pathgen engine: the collaborator seam, its HTTP and scripted
//! implementations, and export of generated learning paths.
mod export;
mod http;
mod runner;
mod scripted;
mod types;
mod wire;

pub use export::{
    ensure_output_dir, export_learning_path, render_learning_path, AtomicFileWriter, PersistError,
    LEARNING_PATH_FILENAME,
};
pub use http::{AgentSettings, HttpAgentRunner};
pub use runner::{AgentRunner, StatusSink};
pub use scripted::{ScriptedAgentRunner, MILESTONE_STATUSES};
pub use types::{AgentError, AgentMessage, AgentRequest, AgentResult};
