mod document;
mod inmemory;

pub use document::DocumentMedicationRepo;
pub use inmemory::InMemoryMedicationRepo;
use medly_domain::{Medication, ID};

#[async_trait::async_trait]
pub trait IMedicationRepo: Send + Sync {
    async fn insert(&self, medication: &Medication) -> anyhow::Result<()>;
    /// Bulk lookup of the medications a set of due reminders points at
    async fn find_many(&self, medication_ids: &[ID]) -> anyhow::Result<Vec<Medication>>;
}
