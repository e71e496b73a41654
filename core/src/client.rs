//! Request builder, response parser and round-trip driver for the agent API.
//!
//! # Design
//! `AgentApiClient` holds only a base URL and a transport handle and carries
//! no mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`; the un-prefixed method runs one through the transport
//! and hands the result to the other. Any 2xx is success, anything else
//! becomes `ClientError::Api` with the body left verbatim.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Agent, CreateAgentRequest, RunAgentRequest, RunAgentResponse, Tool};

/// Synchronous client for the agent API.
///
/// Safe to share between threads when the transport is; the default
/// `UreqTransport` is.
#[derive(Debug, Clone)]
pub struct AgentApiClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl AgentApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> AgentApiClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Round trips
    // -----------------------------------------------------------------------

    pub fn list_tools(&self) -> Result<Vec<Tool>, ClientError> {
        let response = self.transport.execute(self.build_list_tools())?;
        self.parse_list_tools(response)
    }

    pub fn list_agents(&self) -> Result<Vec<Agent>, ClientError> {
        let response = self.transport.execute(self.build_list_agents())?;
        self.parse_list_agents(response)
    }

    pub fn get_agent(&self, agent_id: &str) -> Result<Agent, ClientError> {
        let response = self.transport.execute(self.build_get_agent(agent_id))?;
        self.parse_get_agent(response)
    }

    pub fn create_agent(&self, input: &CreateAgentRequest) -> Result<Agent, ClientError> {
        let response = self.transport.execute(self.build_create_agent(input)?)?;
        self.parse_create_agent(response)
    }

    pub fn delete_agent(&self, agent_id: &str) -> Result<(), ClientError> {
        let response = self.transport.execute(self.build_delete_agent(agent_id))?;
        self.parse_delete_agent(response)
    }

    pub fn run_agent(
        &self,
        agent_id: &str,
        input: &RunAgentRequest,
    ) -> Result<RunAgentResponse, ClientError> {
        let response = self.transport.execute(self.build_run_agent(agent_id, input)?)?;
        self.parse_run_agent(response)
    }

    pub fn clone_agent(
        &self,
        agent_id: &str,
        updates: &Map<String, Value>,
    ) -> Result<Agent, ClientError> {
        let response = self
            .transport
            .execute(self.build_clone_agent(agent_id, updates)?)?;
        self.parse_clone_agent(response)
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_list_tools(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/tools")
    }

    pub fn build_list_agents(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/agents")
    }

    pub fn build_get_agent(&self, agent_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/agents/{agent_id}"))
    }

    pub fn build_create_agent(
        &self,
        input: &CreateAgentRequest,
    ) -> Result<HttpRequest, ClientError> {
        self.json_request("/agents", input)
    }

    pub fn build_delete_agent(&self, agent_id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/agents/{agent_id}"))
    }

    pub fn build_run_agent(
        &self,
        agent_id: &str,
        input: &RunAgentRequest,
    ) -> Result<HttpRequest, ClientError> {
        self.json_request(&format!("/agents/{agent_id}/run"), input)
    }

    pub fn build_clone_agent(
        &self,
        agent_id: &str,
        updates: &Map<String, Value>,
    ) -> Result<HttpRequest, ClientError> {
        self.json_request(&format!("/agents/{agent_id}/clone"), updates)
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(body)
            .map_err(|e| ClientError::Transport(format!("encoding request body: {e}")))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    // -----------------------------------------------------------------------
    // Response parsers
    // -----------------------------------------------------------------------

    pub fn parse_list_tools(&self, response: HttpResponse) -> Result<Vec<Tool>, ClientError> {
        decode(check_status(response)?)
    }

    pub fn parse_list_agents(&self, response: HttpResponse) -> Result<Vec<Agent>, ClientError> {
        decode(check_status(response)?)
    }

    pub fn parse_get_agent(&self, response: HttpResponse) -> Result<Agent, ClientError> {
        decode(check_status(response)?)
    }

    pub fn parse_create_agent(&self, response: HttpResponse) -> Result<Agent, ClientError> {
        decode(check_status(response)?)
    }

    /// The body of a successful delete carries nothing and is ignored.
    pub fn parse_delete_agent(&self, response: HttpResponse) -> Result<(), ClientError> {
        check_status(response)?;
        Ok(())
    }

    pub fn parse_run_agent(&self, response: HttpResponse) -> Result<RunAgentResponse, ClientError> {
        decode(check_status(response)?)
    }

    pub fn parse_clone_agent(&self, response: HttpResponse) -> Result<Agent, ClientError> {
        decode(check_status(response)?)
    }
}

/// Returns the body of a 2xx response, or an `Api` error carrying it as text.
/// Bytes that are not UTF-8 are replaced rather than failing the call.
fn check_status(response: HttpResponse) -> Result<Vec<u8>, ClientError> {
    if response.is_success() {
        return Ok(response.body);
    }
    let body = match String::from_utf8(response.body) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    warn!(status = response.status, %body, "agent API returned an error");
    Err(ClientError::Api {
        status: response.status,
        body,
    })
}

fn decode<T: DeserializeOwned>(body: Vec<u8>) -> Result<T, ClientError> {
    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}
