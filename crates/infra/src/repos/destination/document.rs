use super::IDestinationRepo;
use crate::repos::shared::document::{DocumentClient, Query};
use medly_domain::{Destination, ID};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

pub struct DocumentDestinationRepo {
    client: Arc<DocumentClient>,
    collection_id: String,
}

impl DocumentDestinationRepo {
    pub fn new(client: Arc<DocumentClient>, collection_id: String) -> Self {
        Self {
            client,
            collection_id,
        }
    }
}

/// Wire representation of a registry row. Rows written by old clients may
/// lack the owner or the zone; they map to non-routable / UTC destinations
/// instead of failing the read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DestinationRaw {
    #[serde(rename = "$id")]
    id: String,
    user_id: Option<String>,
    token: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
}

impl DestinationRaw {
    fn into_domain(self) -> anyhow::Result<Destination> {
        Ok(Destination {
            id: self.id.parse()?,
            user_id: self.user_id.and_then(|id| id.parse().ok()),
            token: self.token.unwrap_or_default(),
            timezone: self.timezone.unwrap_or_default(),
        })
    }
}

fn destination_data(destination: &Destination) -> Value {
    json!({
        "userId": destination.user_id.as_ref().map(|id| id.as_string()),
        "token": destination.token,
        "timezone": destination.timezone,
    })
}

#[async_trait::async_trait]
impl IDestinationRepo for DocumentDestinationRepo {
    async fn insert(&self, destination: &Destination) -> anyhow::Result<()> {
        self.client
            .create(
                &self.collection_id,
                destination.id.inner_ref(),
                destination_data(destination),
            )
            .await
    }

    async fn save(&self, destination: &Destination) -> anyhow::Result<()> {
        self.client
            .update(
                &self.collection_id,
                destination.id.inner_ref(),
                destination_data(destination),
            )
            .await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Destination>> {
        let raw: Vec<DestinationRaw> = self
            .client
            .list_all(&self.collection_id, &[], |d: &DestinationRaw| d.id.clone())
            .await?;

        let mut destinations = Vec::with_capacity(raw.len());
        for doc in raw {
            let document_id = doc.id.clone();
            match doc.into_domain() {
                Ok(destination) => destinations.push(destination),
                Err(e) => warn!(
                    "Skipping malformed destination document {}: {:?}",
                    document_id, e
                ),
            }
        }
        Ok(destinations)
    }

    async fn find_by_user(&self, user_id: &ID) -> Option<Destination> {
        let page = match self
            .client
            .list::<DestinationRaw>(
                &self.collection_id,
                &[
                    Query::equal("userId", user_id.as_string()),
                    Query::limit(1),
                ],
            )
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!("Fetching destination for user {} failed: {:?}", user_id, e);
                return None;
            }
        };
        page.documents
            .into_iter()
            .next()
            .and_then(|doc| doc.into_domain().ok())
    }
}
