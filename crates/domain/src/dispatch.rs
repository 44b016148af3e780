use crate::medication::Medication;
use crate::reminder::Reminder;
use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};

/// The message handed to the push transport for one due reminder.
///
/// `data` must carry enough for the mobile client's notification-response
/// handler to apply the taken/snooze transitions without reading the store
/// first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    pub sound: String,
    pub channel_id: String,
    pub priority: String,
    pub data: PushMessageData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessageData {
    pub reminder_id: ID,
    pub time: String,
    pub medicine_name: String,
    pub description: String,
}

impl PushMessage {
    /// Builds the payload for one due reminder. The linked medication only
    /// contributes display fields, so a missing record degrades to defaults
    /// instead of blocking the send.
    pub fn for_reminder(reminder: &Reminder, medication: Option<&Medication>) -> Self {
        let quantity = medication
            .map(|m| m.quantity.clone())
            .filter(|q| !q.is_empty())
            .unwrap_or_else(|| "1".into());
        let frequency = medication.map(|m| m.frequency.clone()).unwrap_or_default();
        let description = if reminder.description.is_empty() {
            "It is time for your medication".to_string()
        } else {
            reminder.description.clone()
        };

        Self {
            title: format!("Time to take {}", reminder.medicine_name),
            body: format!(
                "{}\nDose: {}\nFrequency: {}\nTime: {}\nTap to mark as taken or snooze",
                description, quantity, frequency, reminder.time
            ),
            sound: "default".into(),
            channel_id: "med-reminders".into(),
            priority: "max".into(),
            data: PushMessageData {
                reminder_id: reminder.id.clone(),
                time: reminder.time.clone(),
                medicine_name: reminder.medicine_name.clone(),
                description: reminder.description.clone(),
            },
        }
    }
}

/// What one dispatch run produced. `completed` is false when the run hit its
/// deadline and reported only the sends attempted so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub results: Vec<DispatchResult>,
    pub completed: bool,
}

impl DispatchReport {
    /// Number of attempted sends, successful or not
    pub fn total_sent(&self) -> usize {
        self.results.len()
    }
}

/// One entry of a dispatch run's report: a single attempted send for a
/// (destination, reminder) pair. Ephemeral, never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    /// Push address the message was sent to
    pub to: String,
    pub user_id: ID,
    pub reminder_id: ID,
    pub outcome: DispatchOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum DispatchOutcome {
    /// The transport responded; its status code and raw body are kept for
    /// the audit log. A non-2xx code still counts as a failed attempt.
    Sent { status_code: u16, response: String },
    /// The request itself failed before the transport could answer
    Failed { error: String },
}

impl DispatchOutcome {
    /// Whether the transport accepted the message. Only accepted sends mark
    /// the reminder as notified; everything else stays eligible for a retry
    /// on a later tick.
    pub fn is_accepted(&self) -> bool {
        match self {
            DispatchOutcome::Sent { status_code, .. } => (200..300).contains(status_code),
            DispatchOutcome::Failed { .. } => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn reminder_factory() -> Reminder {
        Reminder {
            id: Default::default(),
            user_id: "u1".parse().expect("Valid ID"),
            medication_id: Some(Default::default()),
            medicine_name: "Aspirin".into(),
            description: "After breakfast".into(),
            date: "2024-07-03".into(),
            time: "08:00".into(),
            taken: false,
            snoozed: false,
            notification_sent: false,
            repeat_schedule: false,
            total_reminders_left: 0,
        }
    }

    #[test]
    fn payload_embeds_everything_the_client_needs() {
        let reminder = reminder_factory();
        let message = PushMessage::for_reminder(&reminder, None);

        assert_eq!(message.title, "Time to take Aspirin");
        assert_eq!(message.data.reminder_id, reminder.id);
        assert_eq!(message.data.time, "08:00");
        assert_eq!(message.data.medicine_name, "Aspirin");
        assert_eq!(message.data.description, "After breakfast");
    }

    #[test]
    fn payload_uses_medication_display_fields_when_linked() {
        let reminder = reminder_factory();
        let medication = Medication {
            id: reminder.medication_id.clone().expect("Linked medication"),
            user_id: reminder.user_id.clone(),
            name: "Aspirin".into(),
            kind: "Tablet".into(),
            quantity: "2".into(),
            frequency: "Twice a day".into(),
            notes: String::new(),
        };

        let message = PushMessage::for_reminder(&reminder, Some(&medication));
        assert!(message.body.contains("Dose: 2"));
        assert!(message.body.contains("Frequency: Twice a day"));
    }

    #[test]
    fn payload_degrades_to_defaults_without_a_medication() {
        let mut reminder = reminder_factory();
        reminder.description = String::new();

        let message = PushMessage::for_reminder(&reminder, None);
        assert!(message.body.contains("Dose: 1"));
        assert!(message.body.starts_with("It is time for your medication"));
    }

    #[test]
    fn only_2xx_transport_answers_count_as_accepted() {
        let accepted = DispatchOutcome::Sent {
            status_code: 200,
            response: "{\"data\":{\"status\":\"ok\"}}".into(),
        };
        assert!(accepted.is_accepted());

        let rejected = DispatchOutcome::Sent {
            status_code: 429,
            response: String::new(),
        };
        assert!(!rejected.is_accepted());

        let failed = DispatchOutcome::Failed {
            error: "connection refused".into(),
        };
        assert!(!failed.is_accepted());
    }
}
