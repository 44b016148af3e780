use crate::local_time::resolve_timezone;
use crate::shared::entity::{Entity, ID};
use chrono_tz::Tz;

/// A user's registered push destination: at most one per user, upserted
/// whenever the mobile client re-registers for push.
///
/// The zone name is stored exactly as registered and resolved leniently at
/// dispatch time; registry rows predating the timezone field, or rows whose
/// owner was never recorded, must not fail a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub id: ID,
    pub user_id: Option<ID>,
    /// Opaque push address. May be stale or garbage; the transport treats
    /// that as a normal failure.
    pub token: String,
    /// IANA zone name, empty when the client never reported one
    pub timezone: String,
}

impl Destination {
    pub fn new(user_id: ID, token: String, timezone: String) -> Self {
        Self {
            id: Default::default(),
            user_id: Some(user_id),
            token,
            timezone,
        }
    }

    /// The sole basis for converting "now" into this user's local frame.
    pub fn tz(&self) -> Tz {
        resolve_timezone(&self.timezone)
    }

    /// A row the dispatch loop can act on: it needs both an owner and an
    /// address.
    pub fn is_routable(&self) -> bool {
        self.user_id.is_some() && !self.token.is_empty()
    }
}

impl Entity for Destination {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_resolves_registered_timezones() {
        let destination = Destination::new(
            "u1".parse().expect("Valid ID"),
            "ExponentPushToken[abc]".into(),
            "Europe/Oslo".into(),
        );
        assert_eq!(destination.tz(), chrono_tz::Europe::Oslo);
    }

    #[test]
    fn it_falls_back_to_utc_for_bad_timezones() {
        let destination = Destination::new(
            "u1".parse().expect("Valid ID"),
            "tok1".into(),
            "Not/AZone".into(),
        );
        assert_eq!(destination.tz(), chrono_tz::UTC);
    }

    #[test]
    fn rows_without_owner_or_address_are_not_routable() {
        let mut destination = Destination::new(
            "u1".parse().expect("Valid ID"),
            "tok1".into(),
            String::new(),
        );
        assert!(destination.is_routable());

        destination.token = String::new();
        assert!(!destination.is_routable());

        destination.token = "tok1".into();
        destination.user_id = None;
        assert!(!destination.is_routable());
    }
}
