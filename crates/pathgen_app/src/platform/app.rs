use std::cell::RefCell;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use pathgen_core::{update, AppState, AppViewModel, Msg};
use pathgen_engine::{AgentRunner, HttpAgentRunner};
use pathgen_logging::{pathgen_info, pathgen_warn};

use super::cli::{Cli, RunSettings};
use super::config::AppConfig;
use super::effects::{DryRunAgent, EffectRunner};
use super::logging;
use super::render::TerminalRenderer;

pub fn run_app() -> anyhow::Result<ExitCode> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let settings = RunSettings::resolve(cli, config)?;

    let level = if settings.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(settings.log, level);
    pathgen_info!(
        "pathgen starting dry_run={} secondary_tool={:?} agent_url={}",
        settings.dry_run,
        settings.secondary_tool,
        settings.agent.agent_url
    );

    let runner: Box<dyn AgentRunner> = if settings.dry_run {
        Box::new(DryRunAgent)
    } else {
        Box::new(HttpAgentRunner::new(settings.agent.clone()))
    };
    let app = App::new(
        EffectRunner::new(runner, settings.output_dir.clone()),
        TerminalRenderer::new(io::stdout(), io::stderr()),
    );

    for msg in settings.form_messages() {
        app.dispatch(msg);
    }
    app.dispatch(Msg::GenerateClicked);

    if app.view().messages.is_empty() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Owns the single state record and routes every message through `update`.
///
/// Effects run after the state borrow is released, so a collaborator may
/// dispatch status messages back into the app while it is still running.
pub struct App<O: Write, E: Write> {
    state: RefCell<AppState>,
    effects: EffectRunner,
    renderer: TerminalRenderer<O, E>,
}

impl<O: Write, E: Write> App<O, E> {
    pub fn new(effects: EffectRunner, renderer: TerminalRenderer<O, E>) -> Self {
        Self {
            state: RefCell::new(AppState::new()),
            effects,
            renderer,
        }
    }

    pub fn dispatch(&self, msg: Msg) {
        let (effects, maybe_view) = {
            let mut guard = self.state.borrow_mut();
            let state = std::mem::take(&mut *guard);
            let (mut state, effects) = update(state, msg);
            let maybe_view = state.consume_dirty().then(|| state.view());
            *guard = state;
            (effects, maybe_view)
        };

        if let Some(view) = maybe_view {
            if let Err(err) = self.renderer.render(&view) {
                pathgen_warn!("Render failed: {}", err);
            }
        }

        for effect in effects {
            self.effects.execute(effect, self);
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.borrow().view()
    }

    pub fn renderer(&self) -> &TerminalRenderer<O, E> {
        &self.renderer
    }
}

#[cfg(test)]
impl App<Vec<u8>, Vec<u8>> {
    fn into_output(self) -> (String, String) {
        let (out, err) = self.renderer.into_writers();
        (
            String::from_utf8_lossy(&out).into_owned(),
            String::from_utf8_lossy(&err).into_owned(),
        )
    }
}
