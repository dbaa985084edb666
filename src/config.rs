//! Static server configuration.
//!
//! Built once at startup (the binary fills it from the command line and the
//! `DOCSERVE_*` environment variables) and shared read-only afterwards.

use std::path::PathBuf;

use compact_str::CompactString;

use crate::domain::resource::DocumentRoot;

/// Number of connections served concurrently.
pub const DEFAULT_POOL_SIZE: usize = 10;
pub const DEFAULT_SERVER_NAME: &str = "docserve";
pub const DEFAULT_LOG_PATH: &str = "../log.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub document_root: DocumentRoot,
    pub port: u16,
    /// Fixed worker count.
    pub pool_size: usize,
    /// Connections allowed to wait for a free worker. `None` never stalls the
    /// accept loop; `Some(n)` stalls it while `n` connections are waiting.
    pub queue_bound: Option<usize>,
    pub server_name: CompactString,
    pub log_path: PathBuf,
}

impl ServerConfig {
    pub fn new(document_root: impl Into<String>, port: u16) -> Self {
        Self {
            document_root: DocumentRoot::new(document_root),
            port,
            pool_size: DEFAULT_POOL_SIZE,
            queue_bound: None,
            server_name: DEFAULT_SERVER_NAME.into(),
            log_path: DEFAULT_LOG_PATH.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::new("/srv", 8080);
        assert_eq!(&*config.document_root, "/srv");
        assert_eq!(config.port, 8080);
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.queue_bound, None);
        assert_eq!(config.server_name, "docserve");
        assert_eq!(config.log_path, PathBuf::from("../log.txt"));
    }
}
