#![allow(dead_code)]

use assistant_widgets::config::WidgetConfig;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value as JsonValue};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::protocol::Message;

pub const WAIT: Duration = Duration::from_secs(5);

/// How the mock shop backend should answer.
#[derive(Clone)]
pub struct Behaviour {
    pub insights_fail: bool,
    pub metrics_body: JsonValue,
    pub cart_available: bool,
    pub analyze_fail: bool,
    pub chat_fail: bool,
    pub chat_delay: Duration,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            insights_fail: false,
            metrics_body: json!({ "optimizations_applied": 5, "ai_decisions_made": 77 }),
            cart_available: true,
            analyze_fail: false,
            chat_fail: false,
            chat_delay: Duration::ZERO,
        }
    }
}

#[derive(Clone, Default)]
pub struct Recorded {
    pub hits: Arc<Mutex<Vec<String>>>,
    pub workflow_bodies: Arc<Mutex<Vec<JsonValue>>>,
    pub chat_bodies: Arc<Mutex<Vec<JsonValue>>>,
}

impl Recorded {
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn workflow_bodies(&self) -> Vec<JsonValue> {
        self.workflow_bodies.lock().unwrap().clone()
    }

    pub fn chat_bodies(&self) -> Vec<JsonValue> {
        self.chat_bodies.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct AppState {
    behaviour: Behaviour,
    recorded: Recorded,
}

pub struct MockBackend {
    pub base: String,
    pub recorded: Recorded,
}

impl MockBackend {
    pub async fn start(behaviour: Behaviour) -> Self {
        let recorded = Recorded::default();
        let state = AppState {
            behaviour,
            recorded: recorded.clone(),
        };
        let app = Router::new()
            .route("/insights/{user_id}", get(insights))
            .route("/recommendations/{user_id}", get(recommendations))
            .route("/metrics", get(metrics))
            .route("/analyze-cart/{user_id}", post(analyze_cart))
            .route("/workflow/customer_optimization", post(workflow))
            .route("/api/ai-chat", post(chat))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base: format!("http://{}", addr),
            recorded,
        }
    }

    /// Config whose HTTP endpoints point here and whose push socket points at `ws_base`.
    pub fn config(&self, ws_base: &str) -> WidgetConfig {
        WidgetConfig::single_origin(&self.base, ws_base).unwrap()
    }
}

fn record(state: &AppState, hit: String) {
    state.recorded.hits.lock().unwrap().push(hit);
}

async fn insights(
    State(state): State<AppState>,
    Path(user_id): Path<String>
) -> Result<Json<JsonValue>, StatusCode> {
    record(&state, format!("GET /insights/{}", user_id));
    if state.behaviour.insights_fail {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(
        Json(
            json!({
            "savings_score": 85,
            "percentage_saved": 12,
            "insights": ["You buy coffee every week", "Sneakers are cheaper on Fridays"]
        })
        )
    )
}

async fn recommendations(State(state): State<AppState>, Path(user_id): Path<String>) -> Json<JsonValue> {
    record(&state, format!("GET /recommendations/{}", user_id));
    Json(
        json!({
        "recommendations": [
            { "name": "Vintage Typewriter", "price": "$67.99" },
            { "name": "Home Barista Kit", "price": "$124.00" },
            { "name": "Terrarium", "price": "$36.45" }
        ]
    })
    )
}

async fn metrics(State(state): State<AppState>) -> Json<JsonValue> {
    record(&state, "GET /metrics".to_string());
    Json(state.behaviour.metrics_body.clone())
}

async fn analyze_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>
) -> Result<Json<JsonValue>, StatusCode> {
    record(&state, format!("POST /analyze-cart/{}", user_id));
    if state.behaviour.analyze_fail {
        return Err(StatusCode::BAD_GATEWAY);
    }
    Ok(
        Json(
            json!({
            "optimization_available": state.behaviour.cart_available,
            "message": "Found a cheaper bundle.",
            "potential_savings": "$18.20"
        })
        )
    )
}

async fn workflow(State(state): State<AppState>, Json(body): Json<JsonValue>) -> Json<JsonValue> {
    record(&state, "POST /workflow/customer_optimization".to_string());
    state.recorded.workflow_bodies.lock().unwrap().push(body);
    Json(json!({ "status": "started" }))
}

async fn chat(
    State(state): State<AppState>,
    Json(body): Json<JsonValue>
) -> Result<Json<JsonValue>, StatusCode> {
    record(&state, "POST /api/ai-chat".to_string());
    let message = body["message"].as_str().unwrap_or_default().to_string();
    state.recorded.chat_bodies.lock().unwrap().push(body);
    tokio::time::sleep(state.behaviour.chat_delay).await;
    if state.behaviour.chat_fail {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    let response = if message == "hello" { "hi".to_string() } else { format!("echo: {}", message) };
    Ok(Json(json!({ "response": response })))
}

/// Payload the push server pings with after sending its frames.
pub const PING_PAYLOAD: &[u8] = b"still-there";

/// One-shot push server: accepts a single connection, records the request
/// path, sends `frames` followed by a ping, then holds the socket open and
/// records the first pong until the client leaves.
pub struct MockPushServer {
    pub base: String,
    pub path: Arc<Mutex<Option<String>>>,
    pub pong: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MockPushServer {
    pub async fn start(frames: Vec<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let path = Arc::new(Mutex::new(None));
        let pong = Arc::new(Mutex::new(None));
        let seen_path = Arc::clone(&path);
        let seen_pong = Arc::clone(&pong);

        tokio::spawn(async move {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let callback = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
                *seen_path.lock().unwrap() = Some(req.uri().path().to_string());
                Ok(resp)
            };
            let Ok(mut websocket) = accept_hdr_async(stream, callback).await else {
                return;
            };
            for frame in frames {
                if websocket.send(Message::Text(frame)).await.is_err() {
                    return;
                }
            }
            if websocket.send(Message::Ping(PING_PAYLOAD.to_vec())).await.is_err() {
                return;
            }
            while let Some(Ok(message)) = websocket.next().await {
                if let Message::Pong(data) = message {
                    seen_pong.lock().unwrap().get_or_insert(data);
                }
            }
        });

        Self {
            base: format!("ws://{}", addr),
            path,
            pong,
        }
    }

    pub fn path(&self) -> Option<String> {
        self.path.lock().unwrap().clone()
    }

    pub fn pong(&self) -> Option<Vec<u8>> {
        self.pong.lock().unwrap().clone()
    }
}

/// A ws base nothing listens on; the push channel fails and stays quiet.
pub const DEAD_WS: &str = "ws://127.0.0.1:9";

/// Accepts connections and never answers them. Returns an `http://` base.
pub async fn start_silent_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    format!("http://{}", addr)
}
