use std::path::Path;

use anyhow::{Result, anyhow};
use log::{debug, warn};

use crate::models::SnapshotPayload;

pub fn parse_payload(raw: &[u8]) -> Result<SnapshotPayload> {
    let mut de = serde_json::Deserializer::from_slice(raw);
    let payload = serde_path_to_error::deserialize(&mut de)
        .map_err(|e| anyhow!("invalid payload at `{}`: {}", e.path(), e.inner()))?;
    de.end()?;
    Ok(payload)
}

/// Reads and parses one payload. Missing and malformed files both come back
/// as `None`; only the log line tells them apart.
pub async fn load_payload(path: &Path) -> Option<SnapshotPayload> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Could not read snapshot {}: {}", path.display(), e);
            return None;
        }
    };

    match parse_payload(&raw) {
        Ok(payload) => {
            debug!("Loaded snapshot {}", path.display());
            Some(payload)
        }
        Err(e) => {
            warn!("Could not parse snapshot {}: {}", path.display(), e);
            None
        }
    }
}
