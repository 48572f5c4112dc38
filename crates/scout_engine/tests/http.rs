use std::net::TcpListener;
use std::time::Duration;

use scout_engine::{
    AgentSettings, FailureKind, HttpOutcome, HttpRequest, HttpWrapper, Interruption,
    NOT_FOUND_ALERT, SERVER_ERROR_PROMPT, UNREACHABLE_PROMPT,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wrapper() -> HttpWrapper {
    HttpWrapper::new(AgentSettings::default())
}

/// An address nothing is listening on.
fn dead_url(suffix: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}{suffix}")
}

#[tokio::test]
async fn plain_response_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/agent"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"message": "hi", "agent_id": "a1"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"success\":true}", "application/json"))
        .mount(&server)
        .await;

    let url = format!("{}/api/agent", server.uri());
    let outcome = wrapper()
        .send(HttpRequest::post_json(&url, &json!({"message": "hi", "agent_id": "a1"})))
        .await
        .unwrap();
    let HttpOutcome::Response(response) = outcome else {
        panic!("expected response, got {outcome:?}");
    };
    assert_eq!(response.status, 200);
    assert_eq!(response.text(), "{\"success\":true}");
}

#[tokio::test]
async fn redirect_becomes_navigation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/login", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("login"))
        .mount(&server)
        .await;

    let outcome = wrapper()
        .send(HttpRequest::get(format!("{}/old", server.uri())))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        HttpOutcome::Navigate {
            location: format!("{}/login", server.uri())
        }
    );
}

#[tokio::test]
async fn not_found_html_replaces_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_raw("<html>missing</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let outcome = wrapper()
        .send(HttpRequest::get(format!("{}/gone", server.uri())))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        HttpOutcome::ReplaceDocument {
            html: "<html>missing</html>".to_string()
        }
    );
}

#[tokio::test]
async fn not_found_json_alerts_outside_agent_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let outcome = wrapper()
        .send(HttpRequest::get(format!("{}/api/health", server.uri())))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        HttpOutcome::Interrupted(Interruption::Alert(NOT_FOUND_ALERT.to_string()))
    );

    let outcome = wrapper()
        .send(HttpRequest::get(format!("{}/api/agent", server.uri())))
        .await
        .unwrap();
    assert!(matches!(outcome, HttpOutcome::Response(r) if r.status == 404));
}

#[tokio::test]
async fn server_error_prompts_reload_outside_agent_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let outcome = wrapper()
        .send(HttpRequest::get(format!("{}/api/status", server.uri())))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        HttpOutcome::Interrupted(Interruption::ConfirmReload(SERVER_ERROR_PROMPT.to_string()))
    );

    let outcome = wrapper()
        .send(HttpRequest::get(format!("{}/api/agent", server.uri())))
        .await
        .unwrap();
    assert!(matches!(outcome, HttpOutcome::Response(r) if r.status == 503));
}

#[tokio::test]
async fn unreachable_backend() {
    let outcome = wrapper().send(HttpRequest::get(dead_url("/api/status"))).await.unwrap();
    assert_eq!(
        outcome,
        HttpOutcome::Interrupted(Interruption::ConfirmReload(UNREACHABLE_PROMPT.to_string()))
    );

    let err = wrapper()
        .send(HttpRequest::get(dead_url("/api/agent")))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn slow_agent_call_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let wrapper = HttpWrapper::new(AgentSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..AgentSettings::default()
    });
    let err = wrapper
        .send(HttpRequest::post_json(
            format!("{}/api/agent", server.uri()),
            &json!({}),
        ))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_agent_reply_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let wrapper = HttpWrapper::new(AgentSettings {
        max_response_bytes: 10,
        ..AgentSettings::default()
    });
    let err = wrapper
        .send(HttpRequest::post_json(
            format!("{}/api/agent", server.uri()),
            &json!({}),
        ))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}
