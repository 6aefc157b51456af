//! Axum web server with WebSocket control for trace playback.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::warn;

use wayfind_graph::{AdjacencyRow, Edge, Graph, Node, NodeId};
use wayfind_search::Algorithm;

use crate::frame::PlaybackFrame;
use crate::playback::{AnimationSpeed, DriveMode, Playback, PlaybackStatus};

/// The graph under study plus the raw nodes the A* heuristic reads.
#[derive(Default)]
struct Scene {
    nodes: Vec<Node>,
    graph: Graph,
}

/// Shared application state.
pub struct AppState {
    scene: RwLock<Scene>,
    playback: RwLock<Playback>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server with an empty scene; clients load graphs over
    /// the API.
    pub fn new() -> Self {
        Self {
            state: Arc::new(AppState {
                scene: RwLock::new(Scene::default()),
                playback: RwLock::new(Playback::new()),
            }),
        }
    }

    /// Create a server pre-seeded with a graph.
    pub fn with_scene(nodes: Vec<Node>, edges: &[Edge], directed: bool) -> Self {
        let graph = Graph::build(&nodes, edges, directed);
        Self {
            state: Arc::new(AppState {
                scene: RwLock::new(Scene { nodes, graph }),
                playback: RwLock::new(Playback::new()),
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            // Scene
            .route("/api/status", get(status_handler))
            .route("/api/graph", post(load_graph_handler))
            .route("/api/graph/adjacency", get(adjacency_handler))
            // Search
            .route("/api/search/start", post(start_handler))
            // Playback controls
            .route("/api/playback", get(playback_status_handler))
            .route("/api/playback/frame", get(frame_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/resume", post(resume_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/step", post(step_handler))
            .route("/api/playback/speed", post(speed_handler))
            // WebSocket for real-time control
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given port.
    pub async fn serve(self, port: u16) -> Result<(), std::io::Error> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Playback server running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await
    }
}

impl Default for VisServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive automatic advancement until the trace settles or the
/// controller is paused, reset, or restarted. The epoch check keeps a
/// superseded loop from touching state it no longer owns.
fn spawn_ticker(state: Arc<AppState>, epoch: u64, delay: Duration) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(delay).await;
            let mut playback = state.playback.write().await;
            if playback.epoch() != epoch || !playback.advance_step() {
                break;
            }
        }
    });
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    node_count: usize,
    directed: bool,
    trace_steps: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let scene = state.scene.read().await;
    let playback = state.playback.read().await;
    Json(StatusResponse {
        status: "ok",
        node_count: scene.nodes.len(),
        directed: scene.graph.is_directed(),
        trace_steps: playback.total_steps(),
    })
}

#[derive(Debug, Deserialize)]
struct GraphRequest {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(default)]
    directed: bool,
}

/// Replace the scene. Any loaded trace refers to the old graph, so
/// playback resets alongside.
async fn load_graph_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GraphRequest>,
) -> Json<Vec<AdjacencyRow>> {
    let graph = Graph::build(&req.nodes, &req.edges, req.directed);
    let rows = graph.adjacency_rows();

    let mut scene = state.scene.write().await;
    let mut playback = state.playback.write().await;
    scene.nodes = req.nodes;
    scene.graph = graph;
    playback.reset();

    Json(rows)
}

async fn adjacency_handler(State(state): State<Arc<AppState>>) -> Json<Vec<AdjacencyRow>> {
    let scene = state.scene.read().await;
    Json(scene.graph.adjacency_rows())
}

#[derive(Debug, Deserialize)]
struct StartRequest {
    algorithm: String,
    source: Option<u64>,
    target: Option<u64>,
    #[serde(default)]
    manual: bool,
}

async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartRequest>,
) -> Result<Json<PlaybackStatus>, StatusCode> {
    let algorithm: Algorithm = req.algorithm.parse().map_err(|err| {
        warn!(%err, "rejected search start");
        StatusCode::BAD_REQUEST
    })?;
    let mode = if req.manual {
        DriveMode::Manual
    } else {
        DriveMode::Automatic
    };

    let scene = state.scene.read().await;
    let mut playback = state.playback.write().await;
    playback
        .start(
            &scene.graph,
            &scene.nodes,
            algorithm,
            req.source.map(NodeId),
            req.target.map(NodeId),
            mode,
        )
        .map_err(|err| {
            warn!(%err, "rejected search start");
            StatusCode::BAD_REQUEST
        })?;

    if mode == DriveMode::Automatic {
        spawn_ticker(state.clone(), playback.epoch(), playback.delay());
    }
    Ok(Json(PlaybackStatus::from(&*playback)))
}

async fn playback_status_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let playback = state.playback.read().await;
    Json(PlaybackStatus::from(&*playback))
}

async fn frame_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackFrame> {
    let playback = state.playback.read().await;
    Json(PlaybackFrame::from(&*playback))
}

async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut playback = state.playback.write().await;
    playback.pause();
    Json(PlaybackStatus::from(&*playback))
}

async fn resume_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut playback = state.playback.write().await;
    if playback.resume() && playback.mode() == DriveMode::Automatic {
        spawn_ticker(state.clone(), playback.epoch(), playback.delay());
    }
    Json(PlaybackStatus::from(&*playback))
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut playback = state.playback.write().await;
    playback.reset();
    Json(PlaybackStatus::from(&*playback))
}

async fn step_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackFrame> {
    let mut playback = state.playback.write().await;
    playback.advance_step();
    Json(PlaybackFrame::from(&*playback))
}

#[derive(Debug, Deserialize)]
struct SpeedRequest {
    speed: u16,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeedRequest>,
) -> Json<PlaybackStatus> {
    let mut playback = state.playback.write().await;
    playback.set_speed(AnimationSpeed::new(req.speed));
    Json(PlaybackStatus::from(&*playback))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    // Send the current frame so a client starts coherent
    let frame = {
        let playback = state.playback.read().await;
        PlaybackFrame::from(&*playback)
    };
    if let Ok(json) = serde_json::to_string(&frame) {
        let _ = socket.send(Message::Text(json.into())).await;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                if let Ok(cmd) = serde_json::from_str::<WsCommand>(&text) {
                    let response = handle_ws_command(&state, cmd).await;
                    if let Ok(json) = serde_json::to_string(&response) {
                        let _ = socket.send(Message::Text(json.into())).await;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum WsCommand {
    #[serde(rename = "get_frame")]
    GetFrame,
    #[serde(rename = "get_status")]
    GetStatus,
    #[serde(rename = "start")]
    Start {
        algorithm: String,
        source: Option<u64>,
        target: Option<u64>,
        #[serde(default)]
        manual: bool,
    },
    #[serde(rename = "step")]
    Step,
    #[serde(rename = "pause")]
    Pause,
    #[serde(rename = "resume")]
    Resume,
    #[serde(rename = "reset")]
    Reset,
    #[serde(rename = "speed")]
    Speed { speed: u16 },
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum WsResponse {
    #[serde(rename = "frame")]
    Frame(PlaybackFrame),
    #[serde(rename = "status")]
    Status(PlaybackStatus),
    #[serde(rename = "error")]
    Error { message: String },
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> WsResponse {
    match cmd {
        WsCommand::GetFrame => {
            let playback = state.playback.read().await;
            WsResponse::Frame(PlaybackFrame::from(&*playback))
        }
        WsCommand::GetStatus => {
            let playback = state.playback.read().await;
            WsResponse::Status(PlaybackStatus::from(&*playback))
        }
        WsCommand::Start {
            algorithm,
            source,
            target,
            manual,
        } => {
            let algorithm: Algorithm = match algorithm.parse() {
                Ok(algorithm) => algorithm,
                Err(err) => {
                    warn!(%err, "rejected search start");
                    return WsResponse::Error {
                        message: err.to_string(),
                    };
                }
            };
            let mode = if manual {
                DriveMode::Manual
            } else {
                DriveMode::Automatic
            };

            let scene = state.scene.read().await;
            let mut playback = state.playback.write().await;
            match playback.start(
                &scene.graph,
                &scene.nodes,
                algorithm,
                source.map(NodeId),
                target.map(NodeId),
                mode,
            ) {
                Ok(()) => {
                    if mode == DriveMode::Automatic {
                        spawn_ticker(state.clone(), playback.epoch(), playback.delay());
                    }
                    WsResponse::Status(PlaybackStatus::from(&*playback))
                }
                Err(err) => {
                    warn!(%err, "rejected search start");
                    WsResponse::Error {
                        message: err.to_string(),
                    }
                }
            }
        }
        WsCommand::Step => {
            let mut playback = state.playback.write().await;
            playback.advance_step();
            WsResponse::Frame(PlaybackFrame::from(&*playback))
        }
        WsCommand::Pause => {
            let mut playback = state.playback.write().await;
            playback.pause();
            WsResponse::Status(PlaybackStatus::from(&*playback))
        }
        WsCommand::Resume => {
            let mut playback = state.playback.write().await;
            if playback.resume() && playback.mode() == DriveMode::Automatic {
                spawn_ticker(state.clone(), playback.epoch(), playback.delay());
            }
            WsResponse::Status(PlaybackStatus::from(&*playback))
        }
        WsCommand::Reset => {
            let mut playback = state.playback.write().await;
            playback.reset();
            WsResponse::Status(PlaybackStatus::from(&*playback))
        }
        WsCommand::Speed { speed } => {
            let mut playback = state.playback.write().await;
            playback.set_speed(AnimationSpeed::new(speed));
            WsResponse::Status(PlaybackStatus::from(&*playback))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackState;

    fn triangle_request() -> GraphRequest {
        GraphRequest {
            nodes: vec![
                Node::new(NodeId(1), 0.0, 0.0),
                Node::new(NodeId(2), 3.0, 0.0),
                Node::new(NodeId(3), 3.0, 3.0),
            ],
            edges: vec![
                Edge::new(NodeId(1), NodeId(2), 4.0),
                Edge::new(NodeId(2), NodeId(3), 1.0),
                Edge::new(NodeId(1), NodeId(3), 10.0),
            ],
            directed: false,
        }
    }

    #[test]
    fn server_creation() {
        let _server = VisServer::new();
    }

    #[test]
    fn router_builds() {
        let server = VisServer::new();
        let _router = server.router();
    }

    #[tokio::test]
    async fn manual_session_over_handlers() {
        let server = VisServer::new();
        let state = server.state.clone();

        let rows = load_graph_handler(State(state.clone()), Json(triangle_request()))
            .await
            .0;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].neighbors, vec!["2(4)", "3(10)"]);

        let status = start_handler(
            State(state.clone()),
            Json(StartRequest {
                algorithm: "dijkstra".into(),
                source: Some(1),
                target: Some(3),
                manual: true,
            }),
        )
        .await
        .unwrap()
        .0;
        assert_eq!(status.state, PlaybackState::Running);
        assert_eq!(status.cursor, 1);
        assert_eq!(status.total_steps, 3);

        let frame = step_handler(State(state.clone())).await.0;
        assert_eq!(frame.cursor, 2);
        assert_eq!(frame.state, PlaybackState::Running);

        let frame = step_handler(State(state.clone())).await.0;
        assert_eq!(frame.state, PlaybackState::Completed);
        assert_eq!(frame.path, Some(vec![NodeId(1), NodeId(2), NodeId(3)]));
        assert_eq!(frame.distance, Some(5.0));
    }

    #[tokio::test]
    async fn start_rejects_unknown_algorithm() {
        let server = VisServer::new();
        let state = server.state.clone();
        let _ = load_graph_handler(State(state.clone()), Json(triangle_request())).await;

        let result = start_handler(
            State(state),
            Json(StartRequest {
                algorithm: "dfs".into(),
                source: Some(1),
                target: Some(3),
                manual: true,
            }),
        )
        .await;
        assert_eq!(result.err(), Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn start_rejects_incomplete_selection() {
        let server = VisServer::new();
        let state = server.state.clone();
        let _ = load_graph_handler(State(state.clone()), Json(triangle_request())).await;

        let result = start_handler(
            State(state),
            Json(StartRequest {
                algorithm: "bfs".into(),
                source: None,
                target: Some(3),
                manual: true,
            }),
        )
        .await;
        assert_eq!(result.err(), Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn loading_a_graph_resets_playback() {
        let server = VisServer::new();
        let state = server.state.clone();
        let _ = load_graph_handler(State(state.clone()), Json(triangle_request())).await;

        let started = start_handler(
            State(state.clone()),
            Json(StartRequest {
                algorithm: "bfs".into(),
                source: Some(1),
                target: Some(3),
                manual: true,
            }),
        )
        .await
        .unwrap()
        .0;
        assert_eq!(started.state, PlaybackState::Running);

        let _ = load_graph_handler(State(state.clone()), Json(triangle_request())).await;
        let status = playback_status_handler(State(state)).await.0;
        assert_eq!(status.state, PlaybackState::Idle);
        assert_eq!(status.total_steps, 0);
    }

    #[tokio::test]
    async fn speed_clamps_into_range() {
        let server = VisServer::new();
        let state = server.state.clone();

        let status = speed_handler(State(state), Json(SpeedRequest { speed: 5000 }))
            .await
            .0;
        assert_eq!(status.speed.get(), 800);
    }

    #[test]
    fn ws_commands_parse() {
        let cmd: WsCommand = serde_json::from_str(
            r#"{"type":"start","algorithm":"astar","source":1,"target":3,"manual":true}"#,
        )
        .unwrap();
        assert!(matches!(cmd, WsCommand::Start { manual: true, .. }));

        let cmd: WsCommand = serde_json::from_str(r#"{"type":"speed","speed":650}"#).unwrap();
        assert!(matches!(cmd, WsCommand::Speed { speed: 650 }));

        assert!(serde_json::from_str::<WsCommand>(r#"{"type":"rewind"}"#).is_err());
    }

    #[test]
    fn ws_responses_are_tagged() {
        let response = WsResponse::Error {
            message: "select both a source and a target node".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("select both"));
    }
}
