mod document;
mod inmemory;

pub use document::DocumentDestinationRepo;
pub use inmemory::InMemoryDestinationRepo;
use medly_domain::{Destination, ID};

#[async_trait::async_trait]
pub trait IDestinationRepo: Send + Sync {
    async fn insert(&self, destination: &Destination) -> anyhow::Result<()>;
    async fn save(&self, destination: &Destination) -> anyhow::Result<()>;
    /// The whole registry: one row per active user
    async fn find_all(&self) -> anyhow::Result<Vec<Destination>>;
    async fn find_by_user(&self, user_id: &ID) -> Option<Destination>;
}
