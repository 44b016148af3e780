use super::IReminderRepo;
use crate::repos::shared::document::{DocumentClient, Query};
use medly_domain::{Reminder, ID};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

pub struct DocumentReminderRepo {
    client: Arc<DocumentClient>,
    collection_id: String,
}

impl DocumentReminderRepo {
    pub fn new(client: Arc<DocumentClient>, collection_id: String) -> Self {
        Self {
            client,
            collection_id,
        }
    }

    fn eligibility_query() -> Query {
        Query::or(vec![
            Query::and(vec![
                Query::equal("taken", false),
                Query::equal("notificationSend", false),
            ]),
            Query::and(vec![
                Query::equal("repeatSchedule", true),
                Query::greater_than("totalRemindersLeft", 0),
            ]),
        ])
    }

    async fn list_domain(&self, filters: &[Query]) -> anyhow::Result<Vec<Reminder>> {
        let raw: Vec<ReminderRaw> = self
            .client
            .list_all(&self.collection_id, filters, |r: &ReminderRaw| r.id.clone())
            .await?;

        let mut reminders = Vec::with_capacity(raw.len());
        for doc in raw {
            let document_id = doc.id.clone();
            match doc.into_domain() {
                Ok(reminder) => reminders.push(reminder),
                Err(e) => warn!("Skipping malformed reminder document {}: {:?}", document_id, e),
            }
        }
        Ok(reminders)
    }
}

/// Wire representation of a reminder document. Fields a client may have
/// failed to write are optional here and resolved while mapping to the
/// domain type.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReminderRaw {
    #[serde(rename = "$id")]
    id: String,
    user_id: Option<String>,
    #[serde(default)]
    medication_id: Option<String>,
    #[serde(default)]
    medicine_name: String,
    #[serde(default)]
    description: String,
    date: Option<String>,
    time: Option<String>,
    #[serde(default)]
    taken: bool,
    #[serde(default)]
    snoozed: bool,
    #[serde(rename = "notificationSend", default)]
    notification_sent: bool,
    #[serde(default)]
    repeat_schedule: bool,
    #[serde(default)]
    total_reminders_left: i64,
}

impl ReminderRaw {
    fn into_domain(self) -> anyhow::Result<Reminder> {
        let user_id = self
            .user_id
            .ok_or_else(|| anyhow::anyhow!("missing userId"))?
            .parse()?;
        let date = self.date.ok_or_else(|| anyhow::anyhow!("missing date"))?;
        let time = self.time.ok_or_else(|| anyhow::anyhow!("missing time"))?;

        Ok(Reminder {
            id: self.id.parse()?,
            user_id,
            medication_id: self.medication_id.and_then(|id| id.parse().ok()),
            medicine_name: self.medicine_name,
            description: self.description,
            date,
            time,
            taken: self.taken,
            snoozed: self.snoozed,
            notification_sent: self.notification_sent,
            repeat_schedule: self.repeat_schedule,
            total_reminders_left: self.total_reminders_left,
        })
    }
}

fn reminder_data(reminder: &Reminder) -> Value {
    json!({
        "userId": reminder.user_id.as_string(),
        "medicationId": reminder.medication_id.as_ref().map(|id| id.as_string()),
        "medicineName": reminder.medicine_name,
        "description": reminder.description,
        "date": reminder.date,
        "time": reminder.time,
        "taken": reminder.taken,
        "snoozed": reminder.snoozed,
        "notificationSend": reminder.notification_sent,
        "repeatSchedule": reminder.repeat_schedule,
        "totalRemindersLeft": reminder.total_reminders_left,
    })
}

#[async_trait::async_trait]
impl IReminderRepo for DocumentReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.client
            .create(
                &self.collection_id,
                reminder.id.inner_ref(),
                reminder_data(reminder),
            )
            .await
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.client
            .update(
                &self.collection_id,
                reminder.id.inner_ref(),
                reminder_data(reminder),
            )
            .await
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let raw: Option<ReminderRaw> = match self
            .client
            .get(&self.collection_id, reminder_id.inner_ref())
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Fetching reminder {} failed: {:?}", reminder_id, e);
                return None;
            }
        };
        raw.and_then(|doc| match doc.into_domain() {
            Ok(reminder) => Some(reminder),
            Err(e) => {
                warn!("Malformed reminder document {}: {:?}", reminder_id, e);
                None
            }
        })
    }

    async fn find_eligible(&self) -> anyhow::Result<Vec<Reminder>> {
        self.list_domain(&[Self::eligibility_query()]).await
    }

    async fn find_by_user_in_range(
        &self,
        user_id: &ID,
        from: &str,
        to: &str,
    ) -> anyhow::Result<Vec<Reminder>> {
        self.list_domain(&[
            Query::equal("userId", user_id.as_string()),
            Query::greater_than_equal("date", from),
            Query::less_than_equal("date", to),
        ])
        .await
    }

    async fn mark_notified(&self, reminder_id: &ID) -> anyhow::Result<()> {
        self.client
            .update(
                &self.collection_id,
                reminder_id.inner_ref(),
                json!({ "notificationSend": true }),
            )
            .await
    }
}
