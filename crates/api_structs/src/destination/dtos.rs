use medly_domain::{Destination, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDTO {
    pub id: ID,
    pub user_id: Option<ID>,
    pub token: String,
    pub timezone: String,
}

impl DestinationDTO {
    pub fn new(destination: Destination) -> Self {
        Self {
            id: destination.id,
            user_id: destination.user_id,
            token: destination.token,
            timezone: destination.timezone,
        }
    }
}
