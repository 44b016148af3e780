use crate::dtos::DestinationDTO;
use medly_domain::{Destination, ID};
use serde::{Deserialize, Serialize};

pub mod register_destination {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
        pub token: String,
        #[serde(default)]
        pub timezone: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub destination: DestinationDTO,
    }

    impl APIResponse {
        pub fn new(destination: Destination) -> Self {
            Self {
                destination: DestinationDTO::new(destination),
            }
        }
    }
}
