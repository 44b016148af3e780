use medly_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub medication_id: Option<ID>,
    pub medicine_name: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub taken: bool,
    pub snoozed: bool,
    #[serde(rename = "notificationSend")]
    pub notification_sent: bool,
    pub repeat_schedule: bool,
    pub total_reminders_left: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            medication_id: reminder.medication_id,
            medicine_name: reminder.medicine_name,
            description: reminder.description,
            date: reminder.date,
            time: reminder.time,
            taken: reminder.taken,
            snoozed: reminder.snoozed,
            notification_sent: reminder.notification_sent,
            repeat_schedule: reminder.repeat_schedule,
            total_reminders_left: reminder.total_reminders_left,
        }
    }
}
