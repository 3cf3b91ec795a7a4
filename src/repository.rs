use std::path::PathBuf;

use log::{debug, warn};

use crate::codec::decode_file_name;
use crate::config::Config;
use crate::loader::load_payload;
use crate::models::{SnapshotId, SnapshotPayload};

/// Read-only access to snapshots keyed by their id.
#[allow(async_fn_in_trait)]
pub trait SnapshotStore {
    /// Every snapshot, most recent first. Never fails: unavailable storage is
    /// an empty archive.
    async fn list(&self) -> Vec<SnapshotId>;

    /// `None` when the snapshot is absent or unreadable.
    async fn load(&self, id: &SnapshotId) -> Option<SnapshotPayload>;

    /// The latest data, stored under a fixed name rather than a timestamp.
    async fn load_current(&self) -> Option<SnapshotPayload>;

    async fn slugs(&self) -> Vec<String> {
        self.list().await.iter().map(SnapshotId::slug).collect()
    }
}

pub struct FsSnapshotStore {
    snapshot_dir: PathBuf,
    current_snapshot: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(snapshot_dir: PathBuf, current_snapshot: PathBuf) -> Self {
        FsSnapshotStore {
            snapshot_dir,
            current_snapshot,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.snapshot_dir.clone(), cfg.current_snapshot.clone())
    }
}

/// Newest first; equal timestamps fall back to file name order.
fn sort_newest_first(found: &mut [(SnapshotId, String)]) {
    found.sort_by(|(a, a_name), (b, b_name)| b.cmp(a).then_with(|| a_name.cmp(b_name)));
}

impl SnapshotStore for FsSnapshotStore {
    async fn list(&self) -> Vec<SnapshotId> {
        let mut read_dir = match tokio::fs::read_dir(&self.snapshot_dir).await {
            Ok(rd) => rd,
            Err(e) => {
                warn!(
                    "Could not read snapshot directory {}: {}",
                    self.snapshot_dir.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut found = Vec::new();
        loop {
            match read_dir.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if let Some(id) = decode_file_name(&name) {
                        found.push((id, name));
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(
                        "Stopped listing {} early: {}",
                        self.snapshot_dir.display(),
                        e
                    );
                    break;
                }
            }
        }

        sort_newest_first(&mut found);
        debug!(
            "Found {} snapshots in {}",
            found.len(),
            self.snapshot_dir.display()
        );
        found.into_iter().map(|(id, _)| id).collect()
    }

    async fn load(&self, id: &SnapshotId) -> Option<SnapshotPayload> {
        load_payload(&self.snapshot_dir.join(id.file_name())).await
    }

    async fn load_current(&self) -> Option<SnapshotPayload> {
        load_payload(&self.current_snapshot).await
    }
}
