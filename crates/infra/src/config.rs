use medly_utils::create_random_secret;
use tracing::{info, warn};

const TRIGGER_SECRET_LEN: usize = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret the external scheduler must present to invoke a dispatch run
    pub trigger_secret: String,
    /// Port for the application to run on
    pub port: usize,
}

impl Config {
    pub fn new() -> Self {
        let trigger_secret = match std::env::var("TRIGGER_SECRET_CODE") {
            Ok(code) => code,
            Err(_) => {
                info!("Did not find TRIGGER_SECRET_CODE environment variable. Going to create one.");
                let code = create_random_secret(TRIGGER_SECRET_LEN);
                info!(
                    "Secret code for triggering dispatch runs was generated and set to: {}",
                    code
                );
                code
            }
        };
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        Self {
            trigger_secret,
            port,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
