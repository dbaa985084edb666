use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::log_entry::LogEntry;

/// Append-only request log shared by every handler.
///
/// Each append opens its own handle in append mode. The mutex only serialises
/// the open/write/flush sequence so that blocks from different workers never
/// interleave; no handle is shared.
#[derive(Debug, Clone)]
pub struct LogSink {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl LogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, entry: &LogEntry<'_>) -> io::Result<()> {
        let block = entry.to_string();

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_path())
            .await?;
        file.write_all(block.as_bytes()).await?;
        file.flush().await
    }
}
