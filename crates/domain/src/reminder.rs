use crate::local_time::{add_minutes_to_time, LocalStamp};
use crate::shared::entity::{Entity, ID};
use itertools::Itertools;
use std::collections::HashMap;

/// How far a snoozed `Reminder` is pushed forward before it is offered for
/// sending again.
pub const SNOOZE_DELAY_MINUTES: i64 = 5;

/// A `Reminder` is one scheduled occurrence of one dose of one `Medication`
/// for one user.
///
/// `date` and `time` are always expressed in the owning user's local
/// calendar and clock. The dispatch engine converts its own "now" into that
/// frame before comparing, never the reverse.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub user_id: ID,
    /// The `Medication` this occurrence belongs to, kept for the dose and
    /// frequency display fields of the push payload. Reminders whose parent
    /// record has gone missing still dispatch with default display fields.
    pub medication_id: Option<ID>,
    pub medicine_name: String,
    pub description: String,
    /// Local calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Local clock time, `HH:MM`, 24 hour
    pub time: String,
    /// Terminal once true
    pub taken: bool,
    pub snoozed: bool,
    /// True once a push has been dispatched for this occurrence. This is the
    /// de-duplication guard between ticks; it is best-effort, not
    /// transactional, so overlapping runs may still double-send.
    pub notification_sent: bool,
    /// Whether this reminder belongs to a recurring series
    pub repeat_schedule: bool,
    /// Remaining scheduled occurrences of the series. Irrelevant when
    /// `repeat_schedule` is false.
    pub total_reminders_left: i64,
}

impl Reminder {
    /// Whether the dispatch engine should still consider this reminder at
    /// all: either it has never been sent and not been taken, or its
    /// recurring series has occurrences left.
    pub fn is_eligible(&self) -> bool {
        (!self.taken && !self.notification_sent)
            || (self.repeat_schedule && self.total_reminders_left > 0)
    }

    /// Exact string match against a resolved local stamp. There is no
    /// tolerance window: a reminder that misses its minute is simply retried
    /// on a later tick while it stays eligible.
    pub fn is_due_at(&self, stamp: &LocalStamp) -> bool {
        self.date == stamp.date && self.time == stamp.time
    }

    /// A push for this occurrence has been accepted by the transport.
    pub fn mark_sent(&mut self) {
        self.notification_sent = true;
    }

    /// Terminal transition. Taking a dose also completes the occurrence of a
    /// recurring series: the countdown decrements here and nowhere else, and
    /// the series stops repeating once it is exhausted.
    pub fn mark_taken(&mut self) {
        self.taken = true;
        if self.repeat_schedule && self.total_reminders_left > 0 {
            self.total_reminders_left -= 1;
            if self.total_reminders_left == 0 {
                self.repeat_schedule = false;
            }
        }
    }

    /// Pushes the reminder `delay_minutes` forward and reopens it for
    /// sending, so the dispatch loop re-matches it at the new time.
    pub fn snooze(&mut self, delay_minutes: i64) -> anyhow::Result<()> {
        self.time = add_minutes_to_time(&self.time, delay_minutes)?;
        self.snoozed = true;
        self.notification_sent = false;
        Ok(())
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Groups a due-set candidate list by owning user. Pure in-memory transform
/// between the bulk read and the per-destination fan-out.
pub fn group_reminders_by_user(reminders: Vec<Reminder>) -> HashMap<ID, Vec<Reminder>> {
    reminders
        .into_iter()
        .map(|r| (r.user_id.clone(), r))
        .into_group_map()
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
    fn eligibility_covers_all_flag_combinations() {
        // (taken, notification_sent) without a recurring series
        let cases = vec![
            (false, false, true),
            (false, true, false),
            (true, false, false),
            (true, true, false),
        ];
        for (taken, notification_sent, expected) in cases {
            let mut reminder = reminder_factory();
            reminder.taken = taken;
            reminder.notification_sent = notification_sent;
            assert_eq!(
                reminder.is_eligible(),
                expected,
                "taken={} notification_sent={}",
                taken,
                notification_sent
            );
        }
    }

    #[test]
    fn recurring_series_with_occurrences_left_stays_eligible() {
        let mut reminder = reminder_factory();
        reminder.taken = true;
        reminder.notification_sent = true;
        reminder.repeat_schedule = true;
        reminder.total_reminders_left = 2;
        assert!(reminder.is_eligible());

        reminder.total_reminders_left = 0;
        assert!(!reminder.is_eligible());
    }

    #[test]
    fn due_matching_is_exact_to_the_minute() {
        let reminder = reminder_factory();

        let exact = LocalStamp {
            date: "2024-07-03".into(),
            time: "08:00".into(),
        };
        assert!(reminder.is_due_at(&exact));

        let one_minute_early = LocalStamp {
            date: "2024-07-03".into(),
            time: "07:59".into(),
        };
        assert!(!reminder.is_due_at(&one_minute_early));

        let one_minute_late = LocalStamp {
            date: "2024-07-03".into(),
            time: "08:01".into(),
        };
        assert!(!reminder.is_due_at(&one_minute_late));

        let wrong_date = LocalStamp {
            date: "2024-07-04".into(),
            time: "08:00".into(),
        };
        assert!(!reminder.is_due_at(&wrong_date));
    }

    #[test]
    fn taking_a_dose_counts_down_the_series() {
        let mut reminder = reminder_factory();
        reminder.repeat_schedule = true;
        reminder.total_reminders_left = 2;

        reminder.mark_taken();
        assert!(reminder.taken);
        assert_eq!(reminder.total_reminders_left, 1);
        assert!(reminder.repeat_schedule);

        reminder.taken = false;
        reminder.mark_taken();
        assert_eq!(reminder.total_reminders_left, 0);
        assert!(!reminder.repeat_schedule, "exhausted series stops repeating");
    }

    #[test]
    fn taking_a_one_off_reminder_leaves_the_counter_alone() {
        let mut reminder = reminder_factory();
        reminder.mark_taken();
        assert!(reminder.taken);
        assert_eq!(reminder.total_reminders_left, 0);
    }

    #[test]
    fn snoozing_reopens_the_reminder_at_a_later_time() {
        let mut reminder = reminder_factory();
        reminder.notification_sent = true;

        reminder.snooze(SNOOZE_DELAY_MINUTES).expect("Valid time");
        assert_eq!(reminder.time, "08:05");
        assert!(reminder.snoozed);
        assert!(!reminder.notification_sent);
        assert!(reminder.is_eligible());
    }

    #[test]
    fn snoozing_wraps_around_midnight_within_the_day() {
        let mut reminder = reminder_factory();
        reminder.time = "23:58".into();

        reminder.snooze(SNOOZE_DELAY_MINUTES).expect("Valid time");
        assert_eq!(reminder.time, "00:03");
        assert_eq!(reminder.date, "2024-07-03");
    }

    #[test]
    fn it_groups_reminders_by_user() {
        let u1: ID = "u1".parse().expect("Valid ID");
        let u2: ID = "u2".parse().expect("Valid ID");

        let mut r1 = reminder_factory();
        r1.user_id = u1.clone();
        let mut r2 = reminder_factory();
        r2.user_id = u2.clone();
        let mut r3 = reminder_factory();
        r3.user_id = u1.clone();

        let grouped = group_reminders_by_user(vec![r1, r2, r3]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.get(&u1).map(|rs| rs.len()), Some(2));
        assert_eq!(grouped.get(&u2).map(|rs| rs.len()), Some(1));
    }
}
