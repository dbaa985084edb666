pub mod handler;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::domain::log_entry::Clock;
use crate::infrastructure::log_sink::LogSink;

/// State every connection handler gets a copy of.
#[derive(Debug, Clone)]
pub struct ServerData {
    pub config: Arc<ServerConfig>,
    pub log: LogSink,
    pub clock: Clock,
}

impl ServerData {
    pub fn new(config: ServerConfig, clock: Clock) -> Self {
        let log = LogSink::new(config.log_path.clone());
        Self {
            config: Arc::new(config),
            log,
            clock,
        }
    }
}
