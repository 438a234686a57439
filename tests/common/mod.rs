// Shared test doubles for session and server tests

#![allow(dead_code)]

use chat_relay::{CompletionClient, CompletionOutcome, OutboundFrame};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub const WAIT: Duration = Duration::from_secs(5);
pub const QUIET: Duration = Duration::from_millis(200);

/// Provider double answering from a fixed script
#[derive(Default)]
pub struct ScriptedClient {
    script: HashMap<String, (Duration, CompletionOutcome)>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, prompt: &str, outcome: CompletionOutcome) -> Self {
        self.script
            .insert(prompt.to_string(), (Duration::ZERO, outcome));
        self
    }

    pub fn delayed(mut self, prompt: &str, delay_ms: u64, outcome: CompletionOutcome) -> Self {
        self.script.insert(
            prompt.to_string(),
            (Duration::from_millis(delay_ms), outcome),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait::async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> CompletionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.get(prompt) {
            Some((delay, outcome)) => {
                tokio::time::sleep(*delay).await;
                outcome.clone()
            }
            None => CompletionOutcome::Unknown(format!("unscripted prompt: {}", prompt)),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Next outbound frame, failing the test after `WAIT`
pub async fn next_frame(rx: &mut mpsc::Receiver<OutboundFrame>) -> OutboundFrame {
    tokio::time::timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for frame")
        .expect("outbound channel closed")
}

/// True when nothing arrives within `QUIET`
pub async fn stays_quiet(rx: &mut mpsc::Receiver<OutboundFrame>) -> bool {
    tokio::time::timeout(QUIET, rx.recv()).await.is_err()
}
