//! HTTP plumbing for prediction requests.

use std::{
    collections::VecDeque,
    future::Future,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use serde_json::Value;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

impl TransportReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response (connection refused, timeout,
    /// body read failure).
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Sends a JSON body to a path of the prediction service.
pub trait PredictionTransport: Send + Sync + 'static {
    fn post_json(
        &self,
        path: &str,
        body: &Value,
    ) -> impl Future<Output = Result<TransportReply, TransportError>> + Send;
}

/// `reqwest`-backed transport rooted at the service base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Without a timeout a request that never resolves stays pending.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl PredictionTransport for HttpTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<TransportReply, TransportError> {
        let url = self.url(path);
        debug!(%url, "POST prediction request");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!(%url, status, "prediction response received");
        Ok(TransportReply { status, body })
    }
}

/// Request captured by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: Value,
}

enum ScriptedReply {
    Ready(Result<TransportReply, TransportError>),
    Deferred(oneshot::Receiver<Result<TransportReply, TransportError>>),
}

/// In-memory transport answering from a queue of scripted replies, used to
/// drive the pipeline without a server.
#[derive(Default)]
pub struct MemoryTransport {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(ScriptedReply::Ready(Ok(TransportReply::new(status, body))));
        self
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.push(ScriptedReply::Ready(Err(error)));
        self
    }

    /// Queues a reply that resolves only when the returned sender fires.
    pub fn defer(&self) -> oneshot::Sender<Result<TransportReply, TransportError>> {
        let (sender, receiver) = oneshot::channel();
        self.push(ScriptedReply::Deferred(receiver));
        sender
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, reply: ScriptedReply) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }
}

impl PredictionTransport for MemoryTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<TransportReply, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                path: path.to_string(),
                body: body.clone(),
            });
        let next = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(ScriptedReply::Ready(reply)) => reply,
            Some(ScriptedReply::Deferred(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("connection closed".into()))),
            None => Err(TransportError::Network("no scripted reply".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_is_joined_without_double_slash() {
        let transport = HttpTransport::new("http://127.0.0.1:5000/", None).unwrap();
        assert_eq!(
            transport.url("/api/bank-churn-prediction"),
            "http://127.0.0.1:5000/api/bank-churn-prediction"
        );
    }

    #[tokio::test]
    async fn memory_transport_replays_in_order() {
        let transport = MemoryTransport::new();
        transport.reply(200, "{}").reply(500, "oops");

        let first = transport.post_json("/a", &json!({"x": 1})).await.unwrap();
        let second = transport.post_json("/b", &json!({})).await.unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(second, TransportReply::new(500, "oops"));
        assert!(transport.post_json("/c", &json!({})).await.is_err());

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].body, json!({"x": 1}));
    }

    #[tokio::test]
    async fn deferred_reply_waits_for_sender() {
        let transport = MemoryTransport::new();
        let sender = transport.defer();
        sender.send(Ok(TransportReply::new(200, "{}"))).unwrap();
        let reply = transport.post_json("/a", &json!({})).await.unwrap();
        assert_eq!(reply.status, 200);

        drop(transport.defer());
        assert!(matches!(
            transport.post_json("/a", &json!({})).await,
            Err(TransportError::Network(_))
        ));
    }
}
