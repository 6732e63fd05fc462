use std::time::Duration;

use futures_util::StreamExt;
use pathgen_logging::{pathgen_debug, pathgen_info, pathgen_warn};
use reqwest::header::ACCEPT;

use crate::wire::{parse_line, LineBuffer, WireEvent};
use crate::{AgentError, AgentRequest, AgentResult, AgentRunner, StatusSink};

#[derive(Debug, Clone)]
pub struct AgentSettings {
    /// Base URL of the agent service; requests go to `{agent_url}/run`.
    pub agent_url: String,
    pub connect_timeout: Duration,
    /// Upper bound on the whole run, body stream included.
    pub request_timeout: Duration,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            agent_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(600),
        }
    }
}

/// Collaborator backed by an agent service speaking newline-delimited JSON.
#[derive(Debug, Clone)]
pub struct HttpAgentRunner {
    settings: AgentSettings,
}

impl HttpAgentRunner {
    pub fn new(settings: AgentSettings) -> Self {
        Self { settings }
    }

    fn run_url(&self) -> Result<url::Url, AgentError> {
        let mut base = url::Url::parse(&self.settings.agent_url)
            .map_err(|err| AgentError::InvalidUrl(err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("run")
            .map_err(|err| AgentError::InvalidUrl(err.to_string()))
    }

    fn build_client(&self) -> Result<reqwest::Client, AgentError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| AgentError::Network(err.to_string()))
    }

    /// Streams one run. Status lines reach `sink` in arrival order; an error
    /// line ends the run immediately. If several result lines arrive the last
    /// one wins.
    pub async fn run_async(
        &self,
        request: &AgentRequest,
        sink: &dyn StatusSink,
    ) -> Result<Option<AgentResult>, AgentError> {
        let url = self.run_url()?;
        let client = self.build_client()?;
        pathgen_info!(
            "Starting agent run url={} goal_len={}",
            url,
            request.user_goal.len()
        );

        let response = client
            .post(url)
            .header(ACCEPT, "application/x-ndjson")
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            pathgen_warn!("Agent run rejected with status {}", status);
            return Err(AgentError::HttpStatus(status.as_u16()));
        }

        let mut result = None;
        let mut buffer = LineBuffer::default();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            buffer.push(&chunk);
            while let Some(line) = buffer.next_line()? {
                handle_line(&line, sink, &mut result)?;
            }
        }
        if let Some(line) = buffer.finish()? {
            handle_line(&line, sink, &mut result)?;
        }

        pathgen_info!("Agent run finished has_result={}", result.is_some());
        Ok(result)
    }
}

impl AgentRunner for HttpAgentRunner {
    fn run(
        &self,
        request: &AgentRequest,
        sink: &dyn StatusSink,
    ) -> Result<Option<AgentResult>, AgentError> {
        // Current-thread runtime: every sink call happens on the caller's thread.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| AgentError::Runtime(err.to_string()))?;
        runtime.block_on(self.run_async(request, sink))
    }
}

fn handle_line(
    line: &str,
    sink: &dyn StatusSink,
    result: &mut Option<AgentResult>,
) -> Result<(), AgentError> {
    match parse_line(line)? {
        Some(WireEvent::Status(text)) => {
            pathgen_debug!("Agent status: {}", text);
            sink.emit(&text);
        }
        Some(WireEvent::Error(text)) => {
            pathgen_warn!("Agent reported failure: {}", text);
            return Err(AgentError::Agent(text));
        }
        Some(WireEvent::Result(bundle)) => {
            *result = Some(bundle);
        }
        None => {}
    }
    Ok(())
}

fn map_reqwest_error(err: reqwest::Error) -> AgentError {
    if err.is_timeout() {
        return AgentError::Timeout;
    }
    AgentError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(agent_url: &str) -> HttpAgentRunner {
        HttpAgentRunner::new(AgentSettings {
            agent_url: agent_url.to_string(),
            ..AgentSettings::default()
        })
    }

    #[test]
    fn run_url_appends_to_base_path() {
        assert_eq!(
            runner("http://localhost:8000").run_url().unwrap().as_str(),
            "http://localhost:8000/run"
        );
        assert_eq!(
            runner("http://localhost:8000/agent").run_url().unwrap().as_str(),
            "http://localhost:8000/agent/run"
        );
        assert_eq!(
            runner("http://localhost:8000/agent/").run_url().unwrap().as_str(),
            "http://localhost:8000/agent/run"
        );
    }

    #[test]
    fn invalid_base_url_is_reported() {
        assert!(matches!(
            runner("not a url").run_url(),
            Err(AgentError::InvalidUrl(_))
        ));
    }
}
