use medly_domain::{Medication, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationDTO {
    pub id: ID,
    pub user_id: ID,
    pub medicine_name: String,
    pub medicine_type: String,
    pub quantity: String,
    pub frequency: String,
    pub notes: String,
}

impl MedicationDTO {
    pub fn new(medication: Medication) -> Self {
        Self {
            id: medication.id,
            user_id: medication.user_id,
            medicine_name: medication.name,
            medicine_type: medication.kind,
            quantity: medication.quantity,
            frequency: medication.frequency,
            notes: medication.notes,
        }
    }
}
