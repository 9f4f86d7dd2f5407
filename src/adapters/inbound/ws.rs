use super::http::AppState;
use crate::domains::logger::DynLogger;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Tracks live WebSocket clients. Each client is represented by the sending
/// half of an unbounded channel drained by that client's writer task.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    connections: RwLock<HashMap<Uuid, mpsc::UnboundedSender<String>>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn connect(&self) -> (Uuid, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.connections.write().await.insert(id, tx);
        (id, rx)
    }

    pub async fn disconnect(&self, id: Uuid) {
        self.connections.write().await.remove(&id);
    }

    /// Returns false when the client is unknown or already gone.
    pub async fn send_personal_message(&self, id: Uuid, message: &str) -> bool {
        match self.connections.read().await.get(&id) {
            Some(tx) => tx.send(message.to_string()).is_ok(),
            None => false,
        }
    }

    /// Send `message` to every client; returns how many received it.
    /// Clients whose writer has gone away are dropped.
    pub async fn broadcast(&self, message: &str) -> usize {
        let mut connections = self.connections.write().await;
        connections.retain(|_, tx| tx.send(message.to_string()).is_ok());
        connections.len()
    }

    pub async fn active_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

pub fn echo_reply(text: &str) -> String {
    format!("Message text was: {}", text)
}

pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.connections.clone(), state.logger.clone()))
}

async fn handle_socket(socket: WebSocket, manager: Arc<ConnectionManager>, logger: DynLogger) {
    let (sender, receiver) = socket.split();
    serve_connection(sender, receiver, manager, logger).await;
}

/// Runs one client: registers it, echoes text frames back to it and forwards
/// anything queued for it (echoes, broadcasts) to `sender`. Returns once the
/// client closes, errors or its stream ends, after queued messages are flushed.
pub async fn serve_connection<S, R, E>(
    mut sender: S,
    mut receiver: R,
    manager: Arc<ConnectionManager>,
    logger: DynLogger,
) where
    S: Sink<Message> + Unpin + Send + 'static,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: std::fmt::Display,
{
    let (id, mut outbound) = manager.connect().await;
    logger.info(&format!("WebSocket client {} connected", id));

    let writer = tokio::spawn(async move {
        while let Some(text) = outbound.recv().await {
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                manager.send_personal_message(id, &echo_reply(&text)).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                logger.warn(&format!("WebSocket client {} errored: {}", id, e));
                break;
            }
        }
    }

    // Dropping the registered sender lets the writer drain and stop.
    manager.disconnect(id).await;
    let _ = writer.await;
    logger.info(&format!("WebSocket client {} disconnected", id));
}
