//! Scripted transport for unit tests.

use super::transport::{HttpRequest, HttpResponse, Transport};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

struct Reply {
    outcome: std::result::Result<HttpResponse, String>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Replays queued replies in order and records every request it sees.
#[derive(Default)]
pub struct FakeTransport {
    requests: Mutex<Vec<HttpRequest>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: Value) {
        self.push(Ok(response(status, body)), None);
    }

    pub fn reply_raw(&self, status: u16, body: &str) {
        self.push(
            Ok(HttpResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
            None,
        );
    }

    pub fn fail(&self, message: &str) {
        self.push(Err(message.to_string()), None);
    }

    /// Queues a reply that is held back until the returned sender fires.
    pub fn reply_gated(&self, status: u16, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Ok(response(status, body)), Some(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(
        &self,
        outcome: std::result::Result<HttpResponse, String>,
        gate: Option<oneshot::Receiver<()>>,
    ) {
        self.replies.lock().unwrap().push_back(Reply { outcome, gate });
    }
}

fn response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: serde_json::to_vec(&body).unwrap(),
    }
}

#[async_trait]
impl Transport for FakeTransport {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left");

        if let Some(gate) = reply.gate {
            let _ = gate.await;
        }
        reply.outcome.map_err(anyhow::Error::msg)
    }
}
