use super::{IPushGateway, PushResponse};
use medly_domain::PushMessage;
use serde::Serialize;

const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

/// Push gateway backed by the Expo push HTTP API.
pub struct ExpoPushGateway {
    http: reqwest::Client,
    url: String,
}

impl ExpoPushGateway {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            url: EXPO_PUSH_URL.to_string(),
        }
    }
}

impl Default for ExpoPushGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ExpoPushRequest<'a> {
    to: &'a str,
    #[serde(flatten)]
    message: &'a PushMessage,
}

#[async_trait::async_trait]
impl IPushGateway for ExpoPushGateway {
    async fn send(&self, to: &str, message: &PushMessage) -> anyhow::Result<PushResponse> {
        let res = self
            .http
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&ExpoPushRequest { to, message })
            .send()
            .await?;

        let status_code = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        Ok(PushResponse { status_code, body })
    }
}
