mod destination;
mod medication;
mod reminder;
mod shared;

use destination::{DocumentDestinationRepo, InMemoryDestinationRepo};
pub use destination::IDestinationRepo;
use medication::{DocumentMedicationRepo, InMemoryMedicationRepo};
pub use medication::IMedicationRepo;
use reminder::{DocumentReminderRepo, InMemoryReminderRepo};
pub use reminder::IReminderRepo;
use shared::document::DocumentClient;
pub use shared::document::DocumentStoreConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub destinations: Arc<dyn IDestinationRepo>,
    pub medications: Arc<dyn IMedicationRepo>,
}

impl Repos {
    pub fn create_document_store(config: DocumentStoreConfig) -> Self {
        let client = Arc::new(DocumentClient::new(&config));
        Self {
            reminders: Arc::new(DocumentReminderRepo::new(
                client.clone(),
                config.reminders_collection.clone(),
            )),
            destinations: Arc::new(DocumentDestinationRepo::new(
                client.clone(),
                config.destinations_collection.clone(),
            )),
            medications: Arc::new(DocumentMedicationRepo::new(
                client,
                config.medications_collection,
            )),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            destinations: Arc::new(InMemoryDestinationRepo::new()),
            medications: Arc::new(InMemoryMedicationRepo::new()),
        }
    }
}
