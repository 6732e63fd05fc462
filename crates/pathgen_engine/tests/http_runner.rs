use std::cell::RefCell;
use std::time::Duration;

use pathgen_engine::{
    AgentError, AgentMessage, AgentRequest, AgentResult, AgentRunner, AgentSettings,
    HttpAgentRunner,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> AgentRequest {
    AgentRequest {
        google_api_key: "key-123".to_string(),
        youtube_pipedream_url: "https://yt.example.com/sse".to_string(),
        drive_pipedream_url: Some("https://drive.example.com/sse".to_string()),
        notion_pipedream_url: None,
        user_goal: "Learn Rust in 2 weeks".to_string(),
    }
}

fn runner_for(server: &MockServer) -> HttpAgentRunner {
    HttpAgentRunner::new(AgentSettings {
        agent_url: server.uri(),
        ..AgentSettings::default()
    })
}

async fn mount_body(server: &MockServer, body: &str) {
    Mock::given(method("POST"))
        .and(path("/run"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn statuses_are_forwarded_in_order_and_result_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/run"))
        .and(header("accept", "application/x-ndjson"))
        .and(body_json(json!({
            "google_api_key": "key-123",
            "youtube_pipedream_url": "https://yt.example.com/sse",
            "drive_pipedream_url": "https://drive.example.com/sse",
            "notion_pipedream_url": null,
            "user_goal": "Learn Rust in 2 weeks",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(concat!(
            "{\"status\":\"Setting up agent with tools: youtube, drive\"}\n",
            "{\"status\":\"Added Google Drive integration\"}\n",
            "\n",
            "{\"status\":\"Learning path generation complete\"}\n",
            "{\"messages\":[{\"content\":\"a\"},{\"content\":\"b\"}]}",
        )))
        .mount(&server)
        .await;

    let seen = RefCell::new(Vec::new());
    let sink = |message: &str| seen.borrow_mut().push(message.to_string());

    let result = runner_for(&server)
        .run_async(&request(), &sink)
        .await
        .expect("run ok");

    assert_eq!(
        seen.into_inner(),
        vec![
            "Setting up agent with tools: youtube, drive".to_string(),
            "Added Google Drive integration".to_string(),
            "Learning path generation complete".to_string(),
        ]
    );
    assert_eq!(result, Some(AgentResult::from_contents(["a", "b"])));
}

#[tokio::test]
async fn stream_without_result_yields_none() {
    let server = MockServer::start().await;
    mount_body(&server, "{\"status\":\"Creating AI agent\"}\n").await;

    let sink = |_: &str| {};
    let result = runner_for(&server).run_async(&request(), &sink).await;
    assert_eq!(result, Ok(None));
}

#[tokio::test]
async fn bundle_without_messages_field_is_kept_as_such() {
    let server = MockServer::start().await;
    mount_body(&server, "{\"summary\":\"done\"}\n").await;

    let sink = |_: &str| {};
    let result = runner_for(&server).run_async(&request(), &sink).await;
    assert_eq!(result, Ok(Some(AgentResult { messages: None })));
}

#[tokio::test]
async fn error_line_fails_the_run_with_its_text() {
    let server = MockServer::start().await;
    mount_body(
        &server,
        concat!(
            "{\"status\":\"Creating AI agent\"}\n",
            "{\"error\":\"API key not valid\"}\n",
            "{\"messages\":[{\"content\":\"ignored\"}]}\n",
        ),
    )
    .await;

    let seen = RefCell::new(Vec::new());
    let sink = |message: &str| seen.borrow_mut().push(message.to_string());
    let err = runner_for(&server)
        .run_async(&request(), &sink)
        .await
        .unwrap_err();

    assert_eq!(err, AgentError::Agent("API key not valid".to_string()));
    assert_eq!(err.to_string(), "API key not valid");
    assert_eq!(seen.into_inner(), vec!["Creating AI agent".to_string()]);
}

#[tokio::test]
async fn http_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/run"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let sink = |_: &str| {};
    let err = runner_for(&server)
        .run_async(&request(), &sink)
        .await
        .unwrap_err();
    assert_eq!(err, AgentError::HttpStatus(502));
}

#[tokio::test]
async fn malformed_line_is_a_protocol_error() {
    let server = MockServer::start().await;
    mount_body(&server, "this is not json\n").await;

    let sink = |_: &str| {};
    let err = runner_for(&server)
        .run_async(&request(), &sink)
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Protocol(_)));
}

#[tokio::test]
async fn slow_agent_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/run"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("{\"messages\":[]}\n"),
        )
        .mount(&server)
        .await;

    let runner = HttpAgentRunner::new(AgentSettings {
        agent_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..AgentSettings::default()
    });
    let sink = |_: &str| {};
    let err = runner.run_async(&request(), &sink).await.unwrap_err();
    assert_eq!(err, AgentError::Timeout);
}

#[test]
fn blocking_run_calls_sink_on_caller_thread() {
    let server_rt = tokio::runtime::Runtime::new().unwrap();
    let server = server_rt.block_on(MockServer::start());
    server_rt.block_on(mount_body(
        &server,
        "{\"status\":\"Creating AI agent\"}\n{\"messages\":[{\"content\":\"x\"}]}\n",
    ));

    let caller = std::thread::current().id();
    let threads = RefCell::new(Vec::new());
    let sink = |_: &str| threads.borrow_mut().push(std::thread::current().id());

    let result = runner_for(&server).run(&request(), &sink).unwrap();

    assert_eq!(threads.into_inner(), vec![caller]);
    assert_eq!(
        result.and_then(|bundle| bundle.messages),
        Some(vec![AgentMessage {
            content: "x".to_string()
        }])
    );
}
