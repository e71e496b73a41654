//! Frontend-facing facade over `agent-api-core`.
//!
//! # Overview
//! `App` is what the desktop frontend's command layer talks to. It exposes
//! the agent API operations one-to-one and lets the user point the app at a
//! different agent service while it runs.
//!
//! # Design
//! - The current client lives behind `RwLock<Arc<AgentApiClient>>`. Each call
//!   clones the `Arc` and releases the lock before doing any I/O, so the URL
//!   a call uses is fixed at the moment it is issued.
//! - `set_api_url` builds a fresh client and swaps it in. Swaps are
//!   last-write-wins; requests already running keep the client they captured.

use std::sync::{Arc, PoisonError, RwLock};

use agent_api_core::{
    Agent, AgentApiClient, ClientConfig, ClientError, CreateAgentRequest, RunAgentRequest,
    RunAgentResponse, Tool,
};
use serde_json::{Map, Value};
use tracing::info;

pub struct App {
    client: RwLock<Arc<AgentApiClient>>,
}

impl App {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: RwLock::new(Arc::new(AgentApiClient::new(config))),
        }
    }

    /// Loads `.env` from the working directory if present, then reads
    /// `AGENT_API_URL`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::new(&ClientConfig::from_env())
    }

    /// The client new calls will use.
    pub fn client(&self) -> Arc<AgentApiClient> {
        Arc::clone(&self.client.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn list_tools(&self) -> Result<Vec<Tool>, ClientError> {
        self.client().list_tools()
    }

    pub fn list_agents(&self) -> Result<Vec<Agent>, ClientError> {
        self.client().list_agents()
    }

    pub fn get_agent(&self, agent_id: &str) -> Result<Agent, ClientError> {
        self.client().get_agent(agent_id)
    }

    pub fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent, ClientError> {
        self.client().create_agent(request)
    }

    pub fn delete_agent(&self, agent_id: &str) -> Result<(), ClientError> {
        self.client().delete_agent(agent_id)
    }

    pub fn run_agent(
        &self,
        agent_id: &str,
        input: impl Into<String>,
        context: Map<String, Value>,
    ) -> Result<RunAgentResponse, ClientError> {
        let request = RunAgentRequest::new(input).with_context(context);
        self.client().run_agent(agent_id, &request)
    }

    pub fn clone_agent(
        &self,
        agent_id: &str,
        updates: &Map<String, Value>,
    ) -> Result<Agent, ClientError> {
        self.client().clone_agent(agent_id, updates)
    }

    /// Points subsequent calls at `base_url` and returns a confirmation
    /// message for the UI.
    pub fn set_api_url(&self, base_url: &str) -> String {
        let client = Arc::new(AgentApiClient::new(&ClientConfig::new(base_url)));
        *self.client.write().unwrap_or_else(PoisonError::into_inner) = client;
        info!(%base_url, "agent API URL changed");
        format!("API URL changed to: {base_url}")
    }

    pub fn api_url(&self) -> String {
        self.client().base_url().to_string()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}
