use super::IReminderRepo;
use crate::repos::shared::inmemory::{find, find_by, insert, save, update_by};
use medly_domain::{Reminder, ID};
use std::sync::Mutex;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_eligible(&self) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r: &Reminder| r.is_eligible()))
    }

    async fn find_by_user_in_range(
        &self,
        user_id: &ID,
        from: &str,
        to: &str,
    ) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r: &Reminder| {
            &r.user_id == user_id && r.date.as_str() >= from && r.date.as_str() <= to
        }))
    }

    async fn mark_notified(&self, reminder_id: &ID) -> anyhow::Result<()> {
        update_by(reminder_id, &self.reminders, |r| r.notification_sent = true)
            .ok_or_else(|| anyhow::anyhow!("No reminder with id: {}", reminder_id))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn reminder_factory(user_id: &ID, date: &str) -> Reminder {
        Reminder {
            id: Default::default(),
            user_id: user_id.clone(),
            medication_id: Some(Default::default()),
            medicine_name: "Aspirin".into(),
            description: String::new(),
            date: date.into(),
            time: "08:00".into(),
            taken: false,
            snoozed: false,
            notification_sent: false,
            repeat_schedule: false,
            total_reminders_left: 0,
        }
    }

    #[tokio::test]
    async fn eligibility_filter_matches_the_domain_predicate() {
        let repo = InMemoryReminderRepo::new();
        let user_id: ID = "u1".parse().expect("Valid ID");

        let pending = reminder_factory(&user_id, "2024-07-03");
        let mut sent = reminder_factory(&user_id, "2024-07-03");
        sent.notification_sent = true;
        let mut taken = reminder_factory(&user_id, "2024-07-03");
        taken.taken = true;
        let mut recurring_done = reminder_factory(&user_id, "2024-07-03");
        recurring_done.taken = true;
        recurring_done.repeat_schedule = true;
        recurring_done.total_reminders_left = 3;

        for r in [&pending, &sent, &taken, &recurring_done].iter() {
            repo.insert(r).await.unwrap();
        }

        let eligible = repo.find_eligible().await.unwrap();
        assert_eq!(eligible.len(), 2);
        assert!(eligible.contains(&pending));
        assert!(eligible.contains(&recurring_done));
    }

    #[tokio::test]
    async fn range_query_is_inclusive_and_per_user() {
        let repo = InMemoryReminderRepo::new();
        let u1: ID = "u1".parse().expect("Valid ID");
        let u2: ID = "u2".parse().expect("Valid ID");

        repo.insert(&reminder_factory(&u1, "2024-07-01")).await.unwrap();
        repo.insert(&reminder_factory(&u1, "2024-07-03")).await.unwrap();
        repo.insert(&reminder_factory(&u1, "2024-07-10")).await.unwrap();
        repo.insert(&reminder_factory(&u2, "2024-07-02")).await.unwrap();

        let report = repo
            .find_by_user_in_range(&u1, "2024-07-01", "2024-07-03")
            .await
            .unwrap();
        assert_eq!(report.len(), 2);
    }

    #[tokio::test]
    async fn mark_notified_only_touches_the_guard() {
        let repo = InMemoryReminderRepo::new();
        let user_id: ID = "u1".parse().expect("Valid ID");
        let reminder = reminder_factory(&user_id, "2024-07-03");
        repo.insert(&reminder).await.unwrap();

        repo.mark_notified(&reminder.id).await.unwrap();
        let stored = repo.find(&reminder.id).await.unwrap();
        assert!(stored.notification_sent);
        assert!(!stored.taken);

        let missing: ID = "missing".parse().expect("Valid ID");
        assert!(repo.mark_notified(&missing).await.is_err());
    }
}
