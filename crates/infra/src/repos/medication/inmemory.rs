use super::IMedicationRepo;
use crate::repos::shared::inmemory::{find_by, insert};
use medly_domain::{Medication, ID};
use std::sync::Mutex;

pub struct InMemoryMedicationRepo {
    medications: Mutex<Vec<Medication>>,
}

impl InMemoryMedicationRepo {
    pub fn new() -> Self {
        Self {
            medications: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMedicationRepo for InMemoryMedicationRepo {
    async fn insert(&self, medication: &Medication) -> anyhow::Result<()> {
        insert(medication, &self.medications);
        Ok(())
    }

    async fn find_many(&self, medication_ids: &[ID]) -> anyhow::Result<Vec<Medication>> {
        Ok(find_by(&self.medications, |m: &Medication| {
            medication_ids.contains(&m.id)
        }))
    }
}
