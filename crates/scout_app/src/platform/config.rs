use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use scout_engine::{AgentSettings, ExportOptions, DEFAULT_EXPORT_FILENAME};
use scout_logging::scout_info;
use serde::{Deserialize, Serialize};

/// Startup configuration read from an optional RON file. Every field has a
/// default, so a file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub agent_path: String,
    pub suggestion_agent_id: String,
    pub research_agent_id: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub redirect_limit: usize,
    pub max_response_bytes: u64,
    pub export_dir: PathBuf,
    pub export_filename: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let agent = AgentSettings::default();
        Self {
            base_url: agent.base_url,
            agent_path: agent.agent_path,
            suggestion_agent_id: agent.suggestion_agent_id,
            research_agent_id: agent.research_agent_id,
            connect_timeout_secs: agent.connect_timeout.as_secs(),
            request_timeout_secs: agent.request_timeout.map(|t| t.as_secs()),
            redirect_limit: agent.redirect_limit,
            max_response_bytes: agent.max_response_bytes,
            export_dir: PathBuf::from("output"),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            log_file: PathBuf::from("contact_scout.log"),
        }
    }
}

impl AppConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };
        let config = Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))?;
        scout_info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings {
            base_url: self.base_url.clone(),
            agent_path: self.agent_path.clone(),
            suggestion_agent_id: self.suggestion_agent_id.clone(),
            research_agent_id: self.research_agent_id.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            redirect_limit: self.redirect_limit,
            max_response_bytes: self.max_response_bytes,
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            filename: self.export_filename.clone(),
        }
    }
}
