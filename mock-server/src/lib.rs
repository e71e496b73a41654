use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, error, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handoff_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Deserialize)]
pub struct CreateAgent {
    pub name: String,
    pub instructions: String,
    pub handoff_description: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub model_settings: Map<String, Value>,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Deserialize)]
pub struct RunAgent {
    pub input: String,
    #[serde(default)]
    pub context: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
pub struct RunResult {
    pub agent_id: String,
    pub result: String,
    pub raw_output: Map<String, Value>,
}

/// An agent plus the settings it was created with; settings are not part of
/// the public agent shape but are echoed back by runs.
#[derive(Clone)]
struct Record {
    agent: Agent,
    model_settings: Map<String, Value>,
}

type Db = Arc<RwLock<HashMap<String, Record>>>;

pub fn catalogue() -> Vec<Tool> {
    vec![
        Tool {
            name: "web_search".to_string(),
            description: "Search the web for up-to-date information".to_string(),
        },
        Tool {
            name: "calculator".to_string(),
            description: "Evaluate arithmetic expressions".to_string(),
        },
        Tool {
            name: "file_reader".to_string(),
            description: "Read files from the agent workspace".to_string(),
        },
    ]
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/tools", get(list_tools))
        .route("/agents", get(list_agents).post(create_agent))
        .route("/agents/{id}", get(get_agent).delete(delete_agent))
        .route("/agents/{id}/run", post(run_agent))
        .route("/agents/{id}/clone", post(clone_agent))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve the mock API on a random local port from a background thread and
/// return its address. For blocking tests that have no runtime of their own.
pub fn spawn() -> std::io::Result<SocketAddr> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = std_listener.local_addr()?;
    std_listener.set_nonblocking(true)?;

    std::thread::spawn(move || {
        let served = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .and_then(|rt| {
                rt.block_on(async {
                    let listener = TcpListener::from_std(std_listener)?;
                    run(listener).await
                })
            });
        if let Err(e) = served {
            error!(%addr, "mock server stopped: {e}");
        }
    });

    Ok(addr)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}

async fn list_tools() -> Json<Vec<Tool>> {
    Json(catalogue())
}

async fn list_agents(State(db): State<Db>) -> Json<Vec<Agent>> {
    let records = db.read().await;
    let mut agents: Vec<Agent> = records.values().map(|r| r.agent.clone()).collect();
    agents.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    Json(agents)
}

async fn create_agent(State(db): State<Db>, Json(input): Json<CreateAgent>) -> Json<Agent> {
    let agent = Agent {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        instructions: input.instructions,
        handoff_description: input.handoff_description,
        model: input.model,
        tools: input.tools,
    };
    debug!(id = %agent.id, name = %agent.name, "created agent");
    db.write().await.insert(
        agent.id.clone(),
        Record {
            agent: agent.clone(),
            model_settings: input.model_settings,
        },
    );
    Json(agent)
}

async fn get_agent(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.read().await.get(&id) {
        Some(record) => Json(record.agent.clone()).into_response(),
        None => not_found(),
    }
}

async fn delete_agent(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.write().await.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

async fn run_agent(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<RunAgent>,
) -> Response {
    let records = db.read().await;
    let Some(record) = records.get(&id) else {
        return not_found();
    };

    let mut raw_output = Map::new();
    raw_output.insert("input".to_string(), json!(input.input));
    raw_output.insert("context".to_string(), Value::Object(input.context));
    raw_output.insert("model".to_string(), json!(record.agent.model));
    raw_output.insert(
        "model_settings".to_string(),
        Value::Object(record.model_settings.clone()),
    );

    Json(RunResult {
        agent_id: id,
        result: format!("{} received: {}", record.agent.name, input.input),
        raw_output,
    })
    .into_response()
}

async fn clone_agent(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(updates): Json<Map<String, Value>>,
) -> Response {
    let mut records = db.write().await;
    let Some(source) = records.get(&id).cloned() else {
        return not_found();
    };

    let mut merged = match serde_json::to_value(&source.agent) {
        Ok(Value::Object(fields)) => fields,
        _ => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };
    merged.extend(updates);
    merged.insert("id".to_string(), json!(Uuid::new_v4().to_string()));

    let agent: Agent = match serde_json::from_value(Value::Object(merged)) {
        Ok(agent) => agent,
        Err(e) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, format!("invalid updates: {e}"))
                .into_response()
        }
    };

    info!(source = %id, clone = %agent.id, "cloned agent");
    records.insert(
        agent.id.clone(),
        Record {
            agent: agent.clone(),
            model_settings: source.model_settings,
        },
    );
    Json(agent).into_response()
}
