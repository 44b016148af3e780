mod expo;
mod inmemory;

pub use expo::ExpoPushGateway;
pub use inmemory::{InMemoryPushGateway, SentPush};
use medly_domain::PushMessage;

/// What the transport answered for one message. A non-2xx code is still a
/// response; callers decide what to do with it.
#[derive(Debug, Clone)]
pub struct PushResponse {
    pub status_code: u16,
    pub body: String,
}

/// Best-effort "send one message to one address" service. No delivery
/// guarantee: an `Ok` only means the transport answered. Stale or garbage
/// addresses come back as normal failures, never as panics.
#[async_trait::async_trait]
pub trait IPushGateway: Send + Sync {
    async fn send(&self, to: &str, message: &PushMessage) -> anyhow::Result<PushResponse>;
}
