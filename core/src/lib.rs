//! Synchronous client core for the agent API.
//!
//! # Overview
//! Turns agent-management calls into REST requests against the agent
//! service and decodes the JSON replies. Every operation is one blocking
//! HTTP round-trip; there is no cache, retry or background work.
//!
//! # Design
//! - `AgentApiClient` holds only a base URL and a `Transport`.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`), with a combined method that runs
//!   the exchange through the transport.
//! - `UreqTransport` is the network implementation; tests plug in their own.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::AgentApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Agent, CreateAgentRequest, ModelSettings, RunAgentRequest, RunAgentResponse, Tool};
