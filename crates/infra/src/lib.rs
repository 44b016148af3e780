mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    DocumentStoreConfig, IDestinationRepo, IMedicationRepo, IReminderRepo, Repos,
};
pub use services::{ExpoPushGateway, IPushGateway, InMemoryPushGateway, PushResponse, SentPush};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct MedlyContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub push: Arc<dyn IPushGateway>,
}

struct ContextParams {
    pub store: DocumentStoreConfig,
}

impl MedlyContext {
    fn create(params: ContextParams) -> Self {
        Self {
            repos: Repos::create_document_store(params.store),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            push: Arc::new(ExpoPushGateway::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> MedlyContext {
    MedlyContext::create(ContextParams {
        store: DocumentStoreConfig::from_env(),
    })
}

/// Context where every collaborator is kept in memory, for tests
pub fn setup_context_inmemory() -> MedlyContext {
    MedlyContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
        push: Arc::new(InMemoryPushGateway::new()),
    }
}
