use super::IMedicationRepo;
use crate::repos::shared::document::{DocumentClient, Query};
use medly_domain::{Medication, ID};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

pub struct DocumentMedicationRepo {
    client: Arc<DocumentClient>,
    collection_id: String,
}

impl DocumentMedicationRepo {
    pub fn new(client: Arc<DocumentClient>, collection_id: String) -> Self {
        Self {
            client,
            collection_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MedicationRaw {
    #[serde(rename = "$id")]
    id: String,
    user_id: Option<String>,
    #[serde(default)]
    medicine_name: String,
    #[serde(default)]
    medicine_type: String,
    #[serde(default)]
    quantity: String,
    #[serde(default)]
    frequency: String,
    #[serde(default)]
    notes: String,
}

impl MedicationRaw {
    fn into_domain(self) -> anyhow::Result<Medication> {
        let user_id = self
            .user_id
            .ok_or_else(|| anyhow::anyhow!("missing userId"))?
            .parse()?;
        Ok(Medication {
            id: self.id.parse()?,
            user_id,
            name: self.medicine_name,
            kind: self.medicine_type,
            quantity: self.quantity,
            frequency: self.frequency,
            notes: self.notes,
        })
    }
}

#[async_trait::async_trait]
impl IMedicationRepo for DocumentMedicationRepo {
    async fn insert(&self, medication: &Medication) -> anyhow::Result<()> {
        self.client
            .create(
                &self.collection_id,
                medication.id.inner_ref(),
                json!({
                    "userId": medication.user_id.as_string(),
                    "medicineName": medication.name,
                    "medicineType": medication.kind,
                    "quantity": medication.quantity,
                    "frequency": medication.frequency,
                    "notes": medication.notes,
                }),
            )
            .await
    }

    async fn find_many(&self, medication_ids: &[ID]) -> anyhow::Result<Vec<Medication>> {
        if medication_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = medication_ids
            .iter()
            .map(|id| id.as_string())
            .collect::<Vec<_>>();
        let raw: Vec<MedicationRaw> = self
            .client
            .list_all(
                &self.collection_id,
                &[Query::equal_any("$id", ids)],
                |m: &MedicationRaw| m.id.clone(),
            )
            .await?;

        let mut medications = Vec::with_capacity(raw.len());
        for doc in raw {
            let document_id = doc.id.clone();
            match doc.into_domain() {
                Ok(medication) => medications.push(medication),
                Err(e) => warn!(
                    "Skipping malformed medication document {}: {:?}",
                    document_id, e
                ),
            }
        }
        Ok(medications)
    }
}
