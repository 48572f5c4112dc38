use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use scout_logging::{scout_debug, scout_info, scout_warn};

use crate::agent::{AgentClient, AgentOutcome, HttpAgentClient};
use crate::decode::{decode_scrape, decode_suggestions};
use crate::instructions::{scrape_instruction, suggestion_instruction};
use crate::{AgentSettings, EngineEvent, Ticket};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("engine worker has stopped")]
    Stopped,
}

enum EngineCommand {
    Scrape { ticket: Ticket, urls: Vec<String> },
    Suggest { ticket: Ticket, topic: String },
}

/// Runs agent calls on a background runtime and reports each one back as an
/// [`EngineEvent`] carrying the caller's ticket.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Starts an engine talking to the HTTP agent endpoint in `settings`.
    pub fn spawn(settings: AgentSettings) -> Result<Self, EngineError> {
        let client = Arc::new(HttpAgentClient::new(settings.clone()));
        Self::with_client(settings, client)
    }

    pub fn with_client(
        settings: AgentSettings,
        client: Arc<dyn AgentClient>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let settings = Arc::new(settings);

        thread::Builder::new()
            .name("scout-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let settings = settings.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(client.as_ref(), &settings, command).await;
                        if event_tx.send(event).is_err() {
                            scout_debug!("engine event dropped: receiver closed");
                        }
                    });
                }
                scout_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn scrape(&self, ticket: Ticket, urls: Vec<String>) -> Result<(), EngineError> {
        scout_info!("scrape {} queued for {} urls", ticket, urls.len());
        self.cmd_tx
            .send(EngineCommand::Scrape { ticket, urls })
            .map_err(|_| EngineError::Stopped)
    }

    pub fn suggest(&self, ticket: Ticket, topic: impl Into<String>) -> Result<(), EngineError> {
        let topic = topic.into();
        scout_info!("suggest {} queued for topic {:?}", ticket, topic);
        self.cmd_tx
            .send(EngineCommand::Suggest { ticket, topic })
            .map_err(|_| EngineError::Stopped)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn AgentClient,
    settings: &AgentSettings,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Scrape { ticket, urls } => {
            let instruction = scrape_instruction(&urls);
            let result = match client.invoke(&instruction, &settings.research_agent_id).await {
                AgentOutcome::Success(response) => Ok(decode_scrape(&response)),
                AgentOutcome::Failure { error } => {
                    scout_warn!("scrape {} failed: {}", ticket, error);
                    Err(error)
                }
            };
            EngineEvent::ScrapeSettled { ticket, result }
        }
        EngineCommand::Suggest { ticket, topic } => {
            let instruction = suggestion_instruction(&topic);
            let result = match client
                .invoke(&instruction, &settings.suggestion_agent_id)
                .await
            {
                AgentOutcome::Success(response) => Ok(decode_suggestions(&response)),
                AgentOutcome::Failure { error } => {
                    scout_warn!("suggest {} failed: {}", ticket, error);
                    Err(error)
                }
            };
            EngineEvent::SuggestSettled { ticket, result }
        }
    }
}
