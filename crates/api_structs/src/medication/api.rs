use crate::dtos::{MedicationDTO, ReminderDTO};
use medly_domain::{Medication, Reminder, ID};
use serde::{Deserialize, Serialize};

pub mod add_medication {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
        pub medicine_name: String,
        pub medicine_type: String,
        pub quantity: String,
        pub frequency: String,
        #[serde(default)]
        pub notes: Option<String>,
        /// One reminder is scheduled per time of day, `HH:MM`
        pub times: Vec<String>,
        /// Local calendar date of the first occurrences, `YYYY-MM-DD`
        pub date: String,
        /// Number of occurrences when the schedule repeats; omitted or zero
        /// means a one-off reminder per time
        #[serde(default)]
        pub repeat_count: Option<i64>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub medication: MedicationDTO,
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(medication: Medication, reminders: Vec<Reminder>) -> Self {
            Self {
                medication: MedicationDTO::new(medication),
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}
