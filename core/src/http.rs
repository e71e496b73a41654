//! HTTP requests and responses as plain data.
//!
//! # Design
//! `AgentApiClient::build_*` produces an `HttpRequest` and
//! `AgentApiClient::parse_*` consumes an `HttpResponse`; a `Transport` sits
//! between the two. Keeping the exchange as owned data means request shaping
//! and response interpretation can be tested without a socket, and a test
//! transport can inspect exactly what would have gone over the wire.

use std::fmt;

/// HTTP method for a request. The agent API only needs these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute: the client's base URL joined with the resource path.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data, with the body read in full.
///
/// The body stays as raw bytes; nothing assumes it is UTF-8 until the
/// client knows whether it is an error message or a JSON payload.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
