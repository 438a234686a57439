use super::config::{DispatchMode, SessionConfig};
use super::stats::{SessionState, SessionStats};
use crate::classifier::to_client_text;
use crate::protocol::{decode_inbound, decode_inbound_bytes, DecodeError, OutboundFrame};
use crate::provider::{CompletionClient, CompletionOutcome};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Server-side state of one client connection
///
/// The session never touches the socket directly: every frame it produces
/// goes through a bounded channel drained by a single writer, so frames are
/// written whole and in the order they were emitted.
pub struct ConnectionSession {
    config: SessionConfig,

    /// When the connection was accepted
    connected_at: DateTime<Utc>,

    /// Shared with spawned reply tasks
    responder: Responder,

    /// Pending messages for the serialized worker (serialized mode only)
    queue: Option<mpsc::Sender<String>>,
}

/// Everything a reply task needs, cheap to clone into spawned tasks
#[derive(Clone)]
struct Responder {
    session_id: Arc<str>,
    client: Arc<dyn CompletionClient>,
    outbound: mpsc::Sender<OutboundFrame>,
    counters: Arc<Counters>,
}

#[derive(Default)]
struct Counters {
    frames_received: AtomicU64,
    frames_dropped: AtomicU64,
    replies_sent: AtomicU64,
    in_flight: AtomicUsize,
    closed: AtomicBool,
}

impl ConnectionSession {
    /// Create a session and the receiver its outbound frames arrive on.
    ///
    /// In serialized mode this spawns the per-connection worker, so it must
    /// run inside a Tokio runtime.
    pub fn new(
        client: Arc<dyn CompletionClient>,
        config: SessionConfig,
    ) -> (Self, mpsc::Receiver<OutboundFrame>) {
        let capacity = config.outbound_buffer.max(1);
        let (outbound, outbound_rx) = mpsc::channel(capacity);
        let session_id: Arc<str> = format!("session-{}", uuid::Uuid::new_v4()).into();

        let responder = Responder {
            session_id,
            client,
            outbound,
            counters: Arc::new(Counters::default()),
        };

        let queue = match config.dispatch {
            DispatchMode::Concurrent => None,
            DispatchMode::Serialized => {
                let (tx, rx) = mpsc::channel(capacity);
                tokio::spawn(run_serialized(rx, responder.clone()));
                Some(tx)
            }
        };

        let session = Self {
            config,
            connected_at: Utc::now(),
            responder,
            queue,
        };

        (session, outbound_rx)
    }

    pub fn id(&self) -> &str {
        &self.responder.session_id
    }

    /// Send the welcome notice. Called once, right after the connection opens.
    pub async fn greet(&self) {
        info!(
            "Client connected: {} (dispatch: {:?})",
            self.id(),
            self.dispatch_mode()
        );
        self.responder.emit(OutboundFrame::welcome()).await;
    }

    /// Handle one inbound text frame
    pub async fn handle_text(&self, payload: &str) {
        self.responder
            .counters
            .frames_received
            .fetch_add(1, Ordering::SeqCst);
        self.accept(decode_inbound(payload)).await;
    }

    /// Handle one inbound binary frame (decoded as UTF-8 JSON)
    pub async fn handle_binary(&self, payload: &[u8]) {
        self.responder
            .counters
            .frames_received
            .fetch_add(1, Ordering::SeqCst);
        self.accept(decode_inbound_bytes(payload)).await;
    }

    async fn accept(&self, decoded: Result<Option<String>, DecodeError>) {
        let counters = &self.responder.counters;
        if counters.closed.load(Ordering::SeqCst) {
            return;
        }

        let message = match decoded {
            Ok(Some(message)) => message,
            Ok(None) => {
                counters.frames_dropped.fetch_add(1, Ordering::SeqCst);
                debug!("Session {}: dropping frame without a message", self.id());
                return;
            }
            Err(e) => {
                // Malformed input is dropped without telling the client
                counters.frames_dropped.fetch_add(1, Ordering::SeqCst);
                warn!("Session {}: error parsing incoming message: {}", self.id(), e);
                return;
            }
        };

        counters.in_flight.fetch_add(1, Ordering::SeqCst);

        match &self.queue {
            None => {
                self.responder.emit(OutboundFrame::echo(message.as_str())).await;
                let responder = self.responder.clone();
                tokio::spawn(async move {
                    responder.answer(&message).await;
                });
            }
            Some(queue) => {
                // Waits while the queue is full
                if queue.send(message).await.is_err() {
                    counters.in_flight.fetch_sub(1, Ordering::SeqCst);
                    warn!("Session {}: worker stopped, message dropped", self.id());
                }
            }
        }
    }

    pub fn state(&self) -> SessionState {
        let counters = &self.responder.counters;
        if counters.closed.load(Ordering::SeqCst) {
            SessionState::Closed
        } else if counters.in_flight.load(Ordering::SeqCst) > 0 {
            SessionState::Processing
        } else {
            SessionState::Open
        }
    }

    /// Get current session statistics
    pub fn stats(&self) -> SessionStats {
        let counters = &self.responder.counters;
        let duration = Utc::now().signed_duration_since(self.connected_at);

        SessionStats {
            session_id: self.id().to_string(),
            connected_at: self.connected_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            frames_received: counters.frames_received.load(Ordering::SeqCst),
            frames_dropped: counters.frames_dropped.load(Ordering::SeqCst),
            replies_sent: counters.replies_sent.load(Ordering::SeqCst),
            in_flight: counters.in_flight.load(Ordering::SeqCst),
            state: self.state(),
        }
    }

    pub fn dispatch_mode(&self) -> DispatchMode {
        self.config.dispatch
    }

    /// Mark the session closed and return its final statistics.
    ///
    /// Provider calls already dispatched keep running; their replies are
    /// discarded once the writer side is gone.
    pub fn close(self) -> SessionStats {
        self.responder.counters.closed.store(true, Ordering::SeqCst);
        let stats = self.stats();

        info!(
            "Client disconnected: {} ({} frames, {} dropped, {} replies, {} in flight)",
            stats.session_id,
            stats.frames_received,
            stats.frames_dropped,
            stats.replies_sent,
            stats.in_flight
        );

        stats
    }
}

impl Responder {
    /// Queue a frame for the writer. Returns false once the connection is gone.
    async fn emit(&self, frame: OutboundFrame) -> bool {
        match self.outbound.send(frame).await {
            Ok(()) => true,
            Err(_) => {
                debug!("Session {}: connection closed, frame discarded", self.session_id);
                false
            }
        }
    }

    /// Run one provider call and emit the classified reply
    async fn answer(&self, message: &str) {
        let outcome = self.client.complete(message).await;

        if outcome.is_ok() {
            debug!("Session {}: reply ready ({})", self.session_id, outcome.kind());
        } else if let CompletionOutcome::Unknown(detail) = &outcome {
            warn!("Session {}: provider call failed: {}", self.session_id, detail);
        } else {
            warn!("Session {}: provider call failed ({})", self.session_id, outcome.kind());
        }

        // Counters settle before the frame becomes visible to the writer
        let frame = OutboundFrame::ai(to_client_text(outcome));
        let permit = self.outbound.reserve().await;
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);

        match permit {
            Ok(permit) => {
                self.counters.replies_sent.fetch_add(1, Ordering::SeqCst);
                permit.send(frame);
            }
            Err(_) => {
                debug!("Session {}: connection closed, reply discarded", self.session_id);
            }
        }
    }
}

/// Per-connection FIFO worker for [`DispatchMode::Serialized`]
async fn run_serialized(mut queue: mpsc::Receiver<String>, responder: Responder) {
    while let Some(message) = queue.recv().await {
        if !responder.emit(OutboundFrame::echo(message.as_str())).await {
            responder.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
            break;
        }
        responder.answer(&message).await;
    }

    debug!("Session {}: serialized worker stopped", responder.session_id);
}
