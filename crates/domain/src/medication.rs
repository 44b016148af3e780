use crate::shared::entity::{Entity, ID};

/// One medication a user has registered, either manually or through the
/// label-scanning flow. The engine only reads its display fields when
/// building push payloads; everything else about it belongs to the app.
#[derive(Debug, Clone, PartialEq)]
pub struct Medication {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    /// Medicine type, e.g. "Tablet"
    pub kind: String,
    /// Dose display value, e.g. "2"
    pub quantity: String,
    /// Frequency display value, e.g. "Twice a day"
    pub frequency: String,
    pub notes: String,
}

impl Entity for Medication {
    fn id(&self) -> &ID {
        &self.id
    }
}
