pub mod protocol;
pub mod state_stream;

use crate::config::Config;
use crate::simulation::SimulationState;
use axum::{
    extract::{ws::Message, ws::WebSocket, State as AxumState, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use protocol::{ClientMessage, ServerMessage};
use state_stream::StateStream;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{interval, Duration};
use tower_http::services::ServeDir;

#[derive(Clone)]
struct AppState {
    stream: StateStream,
    config: Config,
}

pub async fn run_server(
    config: Config,
    state: Arc<RwLock<SimulationState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.address, config.server.port);
    let stream = StateStream::new(state);

    let app_state = AppState {
        stream,
        config: config.clone(),
    };

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        // Renderer assets
        .nest_service("/", ServeDir::new("static"))
        .with_state(app_state);

    log::info!("HTTP server with WebSocket listening on: {}", addr);
    log::info!("WebSocket endpoint: ws://{}/ws", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    AxumState(state): AxumState<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_websocket(socket, state))
}

fn encode(message: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(message) {
        Ok(json) => Some(Message::Text(json)),
        Err(e) => {
            log::error!("Failed to encode server message: {}", e);
            None
        }
    }
}

async fn handle_websocket(socket: WebSocket, app_state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut update_interval = interval(Duration::from_millis(
        1000 / app_state.config.server.update_rate_hz.max(1),
    ));

    loop {
        tokio::select! {
            _ = update_interval.tick() => {
                let message = app_state.stream.update().await;
                if let Some(frame) = encode(&message) {
                    if sender.send(frame).await.is_err() {
                        log::info!("Client disconnected");
                        break;
                    }
                }
            }

            Some(msg) = receiver.next() => {
                match msg {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(ClientMessage::GetState) => {
                            let message = app_state.stream.full_state().await;
                            if let Some(frame) = encode(&message) {
                                let _ = sender.send(frame).await;
                            }
                        }
                        Err(e) => {
                            log::warn!("Ignoring malformed client message: {}", e);
                        }
                    },
                    Ok(Message::Close(_)) => {
                        log::info!("Client requested close");
                        break;
                    }
                    Err(e) => {
                        log::error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    log::info!("WebSocket connection closed");
}
