use super::state::AppState;
use crate::protocol::OutboundFrame;
use crate::session::ConnectionSession;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Drive one WebSocket connection until either side goes away.
///
/// A single writer task owns the sink, so frames emitted by concurrent reply
/// tasks never interleave on the wire.
pub async fn handle_socket(socket: WebSocket, state: AppState) {
    let (session, outbound_rx) =
        ConnectionSession::new(state.client.clone(), state.session_config.clone());
    let (ws_tx, mut ws_rx) = socket.split();

    let writer = tokio::spawn(write_frames(ws_tx, outbound_rx, session.id().to_string()));

    session.greet().await;

    // The reader runs until the stream ends, which is after the close
    // handshake has been answered
    read_frames(&session, &mut ws_rx).await;

    // Dropping the writer closes the outbound queue; late replies are discarded
    writer.abort();
    session.close();
}

async fn read_frames(session: &ConnectionSession, ws_rx: &mut SplitStream<WebSocket>) {
    while let Some(msg) = ws_rx.next().await {
        match msg {
            Ok(Message::Text(text)) => session.handle_text(&text).await,
            Ok(Message::Binary(bytes)) => session.handle_binary(&bytes).await,
            // Keep polling so the queued Close reply gets flushed; the
            // stream yields None once the handshake is done
            Ok(Message::Close(frame)) => {
                debug!("Session {}: client closed ({:?})", session.id(), frame);
            }
            // tungstenite answers pings itself
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
            Err(e) => {
                warn!("Session {}: WebSocket error: {}", session.id(), e);
                break;
            }
        }
    }
}

async fn write_frames(
    mut ws_tx: SplitSink<WebSocket, Message>,
    mut outbound_rx: mpsc::Receiver<OutboundFrame>,
    session_id: String,
) {
    while let Some(frame) = outbound_rx.recv().await {
        let json = match frame.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("Session {}: failed to encode frame: {}", session_id, e);
                continue;
            }
        };

        if let Err(e) = ws_tx.send(Message::Text(json)).await {
            debug!("Session {}: write failed, stopping writer: {}", session_id, e);
            break;
        }
    }
}
