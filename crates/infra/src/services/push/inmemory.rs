use super::{IPushGateway, PushResponse};
use medly_domain::PushMessage;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct SentPush {
    pub to: String,
    pub message: PushMessage,
}

/// Recording push gateway for tests. Individual addresses can be configured
/// to fail at the request level or to be rejected by the transport.
pub struct InMemoryPushGateway {
    pub sent: Mutex<Vec<SentPush>>,
    failing: Mutex<HashSet<String>>,
    rejecting: Mutex<HashSet<String>>,
}

impl InMemoryPushGateway {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            rejecting: Mutex::new(HashSet::new()),
        }
    }

    /// Requests to this address will error before reaching the transport
    pub fn fail_address(&self, to: &str) {
        self.failing.lock().unwrap().insert(to.to_string());
    }

    /// The transport will answer this address with a non-2xx response
    pub fn reject_address(&self, to: &str) {
        self.rejecting.lock().unwrap().insert(to.to_string());
    }

    pub fn sent_messages(&self) -> Vec<SentPush> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryPushGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IPushGateway for InMemoryPushGateway {
    async fn send(&self, to: &str, message: &PushMessage) -> anyhow::Result<PushResponse> {
        if self.failing.lock().unwrap().contains(to) {
            anyhow::bail!("transport unreachable for {}", to);
        }

        self.sent.lock().unwrap().push(SentPush {
            to: to.to_string(),
            message: message.clone(),
        });

        if self.rejecting.lock().unwrap().contains(to) {
            return Ok(PushResponse {
                status_code: 400,
                body: "{\"errors\":[{\"code\":\"DeviceNotRegistered\"}]}".into(),
            });
        }
        Ok(PushResponse {
            status_code: 200,
            body: "{\"data\":{\"status\":\"ok\"}}".into(),
        })
    }
}
