// JSON-lines TelemetrySink: appends one serialized event per line to a file.
//
// **Why JSON lines instead of one JSON document?**
// - Appending never rewrites what is already on disk, so a crash mid-write
//   loses at most the last event
// - Log shippers and `jq` read it line by line without loading the whole file
// - The file is reopened in append mode for each write, so it can be rotated
//   underneath a running process

use crate::core::telemetry::{EngagementEvent, TelemetryError, TelemetrySink};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// File-backed telemetry sink.
///
/// **Why a tokio Mutex?**
/// Two submissions reporting at the same moment would otherwise race their
/// `write_all` calls and could interleave partial lines. The lock is held
/// across the await points of one append, which a std Mutex can't do.
pub struct JsonLinesTelemetrySink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesTelemetrySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TelemetrySink for JsonLinesTelemetrySink {
    async fn record(&self, event: EngagementEvent) -> Result<(), TelemetryError> {
        let mut line = serde_json::to_vec(&event)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}
