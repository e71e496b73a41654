//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and either the expected parse result or the expected error. Comparing
//! parsed JSON (not raw strings) avoids false negatives from field ordering.

use agent_api_core::{
    Agent, AgentApiClient, ClientConfig, ClientError, CreateAgentRequest, HttpMethod, HttpRequest,
    HttpResponse, RunAgentRequest, RunAgentResponse, Tool,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8000";

fn client() -> AgentApiClient {
    AgentApiClient::new(&ClientConfig::new(BASE_URL))
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

/// Check method, URL, headers and body of a built request.
fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    let expected_headers: Vec<(String, String)> = expected
        .get("headers")
        .and_then(Value::as_array)
        .map(|headers| {
            headers
                .iter()
                .map(|h| {
                    let pair = h.as_array().unwrap();
                    (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(body) => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

/// Compare a parse outcome against `expected_result` or `expected_error`.
fn assert_outcome<T>(name: &str, case: &Value, result: Result<T, ClientError>)
where
    T: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    match case.get("expected_error") {
        Some(expected) => {
            let err = result.unwrap_err();
            match expected["kind"].as_str().unwrap() {
                "Api" => match err {
                    ClientError::Api { status, body } => {
                        assert_eq!(u64::from(status), expected["status"].as_u64().unwrap(), "{name}: status");
                        assert_eq!(body, expected["body"].as_str().unwrap(), "{name}: body");
                    }
                    other => panic!("{name}: expected Api error, got {other:?}"),
                },
                "Decode" => assert!(matches!(err, ClientError::Decode(_)), "{name}: expected Decode, got {err:?}"),
                other => panic!("{name}: unknown expected_error kind: {other}"),
            }
        }
        None => {
            let parsed = result.unwrap();
            if let Some(expected) = case.get("expected_result") {
                let expected: T = serde_json::from_value(expected.clone()).unwrap();
                assert_eq!(parsed, expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

#[test]
fn list_tools_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list_tools.json")) {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_list_tools(), &case["expected_request"]);
        assert_outcome::<Vec<Tool>>(name, &case, c.parse_list_tools(simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// List agents
// ---------------------------------------------------------------------------

#[test]
fn list_agents_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list_agents.json")) {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_list_agents(), &case["expected_request"]);
        assert_outcome::<Vec<Agent>>(name, &case, c.parse_list_agents(simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_agent_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create_agent.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateAgentRequest = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_create_agent(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<Agent>(name, &case, c.parse_create_agent(simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_agent_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get_agent.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        assert_request(name, &c.build_get_agent(id), &case["expected_request"]);
        assert_outcome::<Agent>(name, &case, c.parse_get_agent(simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_agent_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete_agent.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        assert_request(name, &c.build_delete_agent(id), &case["expected_request"]);

        let result = c.parse_delete_agent(simulated(&case));
        if case.get("expected_error").is_some() {
            let err = result.unwrap_err();
            assert_eq!(err.status(), case["expected_error"]["status"].as_u64().map(|s| s as u16), "{name}: status");
            assert!(err.to_string().contains(case["expected_error"]["body"].as_str().unwrap()), "{name}: message");
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

#[test]
fn run_agent_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/run_agent.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let input: RunAgentRequest = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_run_agent(id, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<RunAgentResponse>(name, &case, c.parse_run_agent(simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Clone
// ---------------------------------------------------------------------------

#[test]
fn clone_agent_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/clone_agent.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let updates = case["input"].as_object().unwrap();
        let req = c.build_clone_agent(id, updates).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<Agent>(name, &case, c.parse_clone_agent(simulated(&case)));
    }
}
