// In-process fake game server: a WebSocket push route plus recording command routes.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header::COOKIE},
    response::IntoResponse,
    routing::{get, post},
};
use game_client::domain::Notifier;
use game_client::use_cases::{Presenter, View};
use serde_json::Value;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: Value,
    pub cookie: Option<String>,
}

#[derive(Clone)]
struct ServerState {
    // Frames fanned out to every connected push socket.
    frames_tx: broadcast::Sender<Message>,
    // Cookie header of every push handshake, in connection order.
    handshakes: Arc<Mutex<Vec<Option<String>>>>,
    // Every command request the server has seen, in arrival order.
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    // Status and plain-text body returned to every command.
    reply: Arc<Mutex<(StatusCode, String)>>,
}

pub struct FakeServer {
    pub base_url: String,
    pub push_url: String,
    state: ServerState,
}

impl FakeServer {
    /// Binds an ephemeral port and serves until the test runtime shuts down.
    pub async fn start() -> Self {
        let (frames_tx, _frames_rx) = broadcast::channel(64);
        let state = ServerState {
            frames_tx,
            handshakes: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new((StatusCode::CREATED, String::new()))),
        };

        let app = Router::new()
            .route("/listen", get(listen))
            .route("/api/games", post(create_game))
            .route("/api/games/{game_id}", post(make_move))
            .route("/api/username", post(update_username))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            push_url: format!("ws://{addr}/listen"),
            state,
        }
    }

    pub fn reply_with(&self, status: StatusCode, body: &str) {
        let mut guard = self.state.reply.lock().expect("reply mutex poisoned");
        *guard = (status, body.to_string());
    }

    /// Pushes one raw text frame to every connected client.
    pub fn push(&self, frame: impl Into<String>) {
        let frame: String = frame.into();
        let _ = self.state.frames_tx.send(Message::Text(frame.into()));
    }

    pub fn push_binary(&self, payload: Vec<u8>) {
        let _ = self.state.frames_tx.send(Message::Binary(payload.into()));
    }

    pub fn push_ping(&self) {
        let _ = self.state.frames_tx.send(Message::Ping(b"ping".to_vec().into()));
    }

    pub fn handshake_cookies(&self) -> Vec<Option<String>> {
        self.state
            .handshakes
            .lock()
            .expect("handshakes mutex poisoned")
            .clone()
    }

    pub fn push_json(&self, frame: Value) {
        self.push(frame.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("requests mutex poisoned")
            .clone()
    }
}

async fn listen(
    ws: WebSocketUpgrade,
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state
        .handshakes
        .lock()
        .expect("handshakes mutex poisoned")
        .push(cookie_of(&headers));
    // Subscribe before the upgrade completes so no frame pushed after the handshake is lost.
    let frames_rx = state.frames_tx.subscribe();
    ws.on_upgrade(move |socket| forward_frames(socket, frames_rx))
}

async fn forward_frames(mut socket: WebSocket, mut frames_rx: broadcast::Receiver<Message>) {
    while let Ok(frame) = frames_rx.recv().await {
        if socket.send(frame).await.is_err() {
            break;
        }
    }
}

fn record(
    state: &ServerState,
    path: String,
    headers: &HeaderMap,
    body: Value,
) -> (StatusCode, String) {
    let cookie = cookie_of(headers);
    state
        .requests
        .lock()
        .expect("requests mutex poisoned")
        .push(RecordedRequest { path, body, cookie });

    state.reply.lock().expect("reply mutex poisoned").clone()
}

fn cookie_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn create_game(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    record(&state, "/api/games".to_string(), &headers, body)
}

async fn make_move(
    State(state): State<ServerState>,
    Path(game_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    record(&state, format!("/api/games/{game_id}"), &headers, body)
}

async fn update_username(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    record(&state, "/api/username".to_string(), &headers, body)
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .expect("alerts mutex poisoned")
            .push(message.to_string());
    }
}

#[derive(Clone, Default)]
pub struct RecordingPresenter {
    views: Arc<Mutex<Vec<View>>>,
}

impl RecordingPresenter {
    pub fn views(&self) -> Vec<View> {
        self.views.lock().expect("views mutex poisoned").clone()
    }

    pub fn last(&self) -> Option<View> {
        self.views().pop()
    }
}

impl Presenter for RecordingPresenter {
    fn show(&self, view: &View) {
        self.views
            .lock()
            .expect("views mutex poisoned")
            .push(view.clone());
    }
}

/// Polls `check` until it holds, failing the test after a couple of seconds.
pub async fn eventually<F>(mut check: F)
where
    F: FnMut() -> bool,
{
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition did not hold in time");
}
