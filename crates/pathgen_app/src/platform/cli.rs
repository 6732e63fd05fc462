use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use pathgen_core::{Msg, SecondaryTool};
use pathgen_engine::AgentSettings;

use super::config::{AppConfig, ToolChoice};
use super::logging::LogDestination;

#[derive(Parser)]
#[command(
    name = "pathgen",
    version,
    about = "Create personalized learning paths from your goals"
)]
pub struct Cli {
    /// Google API key used by the agent.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    /// YouTube Pipedream URL (required).
    #[arg(long, env = "YOUTUBE_PIPEDREAM_URL")]
    pub youtube_url: Option<String>,

    /// Secondary tool receiving the learning path.
    #[arg(long, value_enum)]
    pub secondary_tool: Option<ToolChoice>,

    /// Drive Pipedream URL, used when the secondary tool is Drive.
    #[arg(long, env = "DRIVE_PIPEDREAM_URL")]
    pub drive_url: Option<String>,

    /// Notion Pipedream URL, used when the secondary tool is Notion.
    #[arg(long, env = "NOTION_PIPEDREAM_URL")]
    pub notion_url: Option<String>,

    /// What you want to learn, e.g. "Learn Python basics in 1 week". Use `-`
    /// to read it from stdin.
    #[arg(long)]
    pub goal: Option<String>,

    /// Base URL of the agent service.
    #[arg(long, env = "PATHGEN_AGENT_URL")]
    pub agent_url: Option<String>,

    /// Settings file (RON). Defaults to ./pathgen.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory that receives learning_path.md after a successful run.
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Replay a scripted agent run instead of calling the agent service.
    #[arg(long)]
    pub dry_run: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a run needs once flags, environment and config are merged.
///
/// Not `Debug`: it carries the API key.
#[derive(Clone)]
pub struct RunSettings {
    pub google_api_key: String,
    pub youtube_url: String,
    pub secondary_tool: SecondaryTool,
    pub secondary_url: String,
    pub goal: String,
    pub agent: AgentSettings,
    pub output_dir: Option<PathBuf>,
    pub log: LogDestination,
    pub dry_run: bool,
    pub verbose: bool,
}

impl RunSettings {
    /// Flags (and their environment fallbacks) win over the config file.
    pub fn resolve(cli: Cli, config: AppConfig) -> anyhow::Result<Self> {
        let drive_url = cli.drive_url.or(config.drive_url);
        let notion_url = cli.notion_url.or(config.notion_url);
        let secondary_tool = match cli.secondary_tool.or(config.secondary_tool) {
            Some(ToolChoice::Drive) => SecondaryTool::Drive,
            Some(ToolChoice::Notion) => SecondaryTool::Notion,
            None if drive_url.is_none() && notion_url.is_some() => SecondaryTool::Notion,
            None => SecondaryTool::Drive,
        };
        let secondary_url = match secondary_tool {
            SecondaryTool::Drive => drive_url,
            SecondaryTool::Notion => notion_url,
        };

        let goal = match cli.goal.as_deref() {
            Some("-") => read_goal(io::stdin().lock())?,
            Some(goal) => goal.to_string(),
            None => String::new(),
        };

        let defaults = AgentSettings::default();
        let agent = AgentSettings {
            agent_url: cli
                .agent_url
                .or(config.agent_url)
                .unwrap_or(defaults.agent_url),
            connect_timeout: config
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            request_timeout: config
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        };

        Ok(Self {
            google_api_key: cli.google_api_key.unwrap_or_default(),
            youtube_url: cli.youtube_url.or(config.youtube_url).unwrap_or_default(),
            secondary_tool,
            secondary_url: secondary_url.unwrap_or_default(),
            goal,
            agent,
            output_dir: cli.output.or(config.output_dir),
            log: cli.log.or(config.log).unwrap_or_default(),
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// The form edits a user would make, in field order. The tool is selected
    /// before its URL is typed, since selecting clears the other endpoint.
    pub fn form_messages(&self) -> Vec<Msg> {
        vec![
            Msg::ApiKeyChanged(self.google_api_key.clone()),
            Msg::YoutubeUrlChanged(self.youtube_url.clone()),
            Msg::SecondaryToolSelected(self.secondary_tool),
            Msg::SecondaryUrlChanged(self.secondary_url.clone()),
            Msg::GoalChanged(self.goal.clone()),
        ]
    }
}

fn read_goal(mut input: impl Read) -> anyhow::Result<String> {
    let mut goal = String::new();
    input
        .read_to_string(&mut goal)
        .context("reading learning goal from stdin")?;
    Ok(goal.trim().to_string())
}
