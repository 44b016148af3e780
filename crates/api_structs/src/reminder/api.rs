use crate::dtos::ReminderDTO;
use medly_domain::Reminder;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod mark_reminder_taken {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: String,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod snooze_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: String,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod update_reminder_time {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub time: String,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_adherence_report {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub from: String,
        pub to: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub total: usize,
        pub taken: usize,
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            let taken = reminders.iter().filter(|r| r.taken).count();
            Self {
                total: reminders.len(),
                taken,
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}
