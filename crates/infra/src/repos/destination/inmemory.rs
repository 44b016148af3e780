use super::IDestinationRepo;
use crate::repos::shared::inmemory::{find_by, insert, save};
use medly_domain::{Destination, ID};
use std::sync::Mutex;

pub struct InMemoryDestinationRepo {
    destinations: Mutex<Vec<Destination>>,
}

impl InMemoryDestinationRepo {
    pub fn new() -> Self {
        Self {
            destinations: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDestinationRepo for InMemoryDestinationRepo {
    async fn insert(&self, destination: &Destination) -> anyhow::Result<()> {
        insert(destination, &self.destinations);
        Ok(())
    }

    async fn save(&self, destination: &Destination) -> anyhow::Result<()> {
        save(destination, &self.destinations);
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Destination>> {
        Ok(find_by(&self.destinations, |_| true))
    }

    async fn find_by_user(&self, user_id: &ID) -> Option<Destination> {
        find_by(&self.destinations, |d: &Destination| {
            d.user_id.as_ref() == Some(user_id)
        })
        .into_iter()
        .next()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn it_upserts_one_row_per_user() {
        let repo = InMemoryDestinationRepo::new();
        let user_id: ID = "u1".parse().expect("Valid ID");

        let mut destination = Destination::new(user_id.clone(), "tok1".into(), "UTC".into());
        repo.insert(&destination).await.unwrap();

        destination.token = "tok2".into();
        repo.save(&destination).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].token, "tok2");
        assert_eq!(
            repo.find_by_user(&user_id).await.map(|d| d.token),
            Some("tok2".to_string())
        );
    }
}
