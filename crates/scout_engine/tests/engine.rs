use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scout_engine::{
    AgentClient, AgentOutcome, AgentResponse, AgentSettings, EngineEvent, EngineHandle,
    ScrapeReply, SuggestReply,
};
use serde_json::json;

/// Replays canned outcomes and records every call.
struct ScriptedAgent {
    calls: Mutex<Vec<(String, String)>>,
    outcome: AgentOutcome,
}

impl ScriptedAgent {
    fn new(outcome: AgentOutcome) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome,
        })
    }
}

#[async_trait]
impl AgentClient for ScriptedAgent {
    async fn invoke(&self, instruction: &str, agent_id: &str) -> AgentOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((instruction.to_string(), agent_id.to_string()));
        self.outcome.clone()
    }
}

fn settings() -> AgentSettings {
    AgentSettings {
        suggestion_agent_id: "suggest-agent".to_string(),
        research_agent_id: "research-agent".to_string(),
        ..AgentSettings::default()
    }
}

#[test]
fn scrape_goes_to_research_agent_and_echoes_ticket() {
    let agent = ScriptedAgent::new(AgentOutcome::Success(AgentResponse {
        result: json!({"contacts": [{"name": "Ann"}]}),
        message: None,
    }));
    let engine = EngineHandle::with_client(settings(), agent.clone()).unwrap();

    engine
        .scrape(41, vec!["https://a.com".to_string(), "https://b.com".to_string()])
        .unwrap();
    let event = engine.recv_timeout(Duration::from_secs(5)).expect("event");

    let EngineEvent::ScrapeSettled { ticket, result } = event else {
        panic!("unexpected event {event:?}");
    };
    assert_eq!(ticket, 41);
    let Ok(ScrapeReply::Contacts { contacts, .. }) = result else {
        panic!("expected contacts");
    };
    assert_eq!(contacts[0].name, "Ann");

    let calls = agent.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "research-agent");
    assert!(calls[0].0.contains("URL 1: https://a.com\nURL 2: https://b.com"));
}

#[test]
fn suggest_failure_is_reported_with_message() {
    let agent = ScriptedAgent::new(AgentOutcome::failure("Network error."));
    let engine = EngineHandle::with_client(settings(), agent.clone()).unwrap();

    engine.suggest(3, "sell-side analysts").unwrap();
    let event = engine.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(
        event,
        EngineEvent::SuggestSettled {
            ticket: 3,
            result: Err("Network error.".to_string()),
        }
    );
    let calls = agent.calls.lock().unwrap();
    assert_eq!(calls[0].1, "suggest-agent");
    assert!(calls[0].0.contains("for: sell-side analysts."));
}

#[test]
fn empty_suggestion_result_settles_as_empty() {
    let agent = ScriptedAgent::new(AgentOutcome::Success(AgentResponse {
        result: json!({}),
        message: None,
    }));
    let engine = EngineHandle::with_client(settings(), agent).unwrap();
    engine.suggest(9, "x").unwrap();
    assert_eq!(
        engine.recv_timeout(Duration::from_secs(5)),
        Some(EngineEvent::SuggestSettled {
            ticket: 9,
            result: Ok(SuggestReply::Empty),
        })
    );
    assert!(engine.try_recv().is_none());
}
