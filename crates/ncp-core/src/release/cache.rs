//! On-disk cache of release metadata and downloaded assets.
//!
//! Layout under the cache root:
//!
//! ```text
//! .cache/<release id>.json   metadata, one file per identifier ("latest" included)
//! <release id or tag>/<file> downloaded assets
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use super::{ReleaseId, ReleaseInfo, LATEST_MAX_AGE_SECS};
use crate::sanitize::path_component;

const METADATA_DIR: &str = ".cache";

#[derive(Debug, Clone)]
pub struct ReleaseCache {
    root: PathBuf,
}

impl ReleaseCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn metadata_path(&self, id: &ReleaseId) -> PathBuf {
        self.root
            .join(METADATA_DIR)
            .join(format!("{}.json", path_component(id.as_str())))
    }

    /// Directory holding assets for a release identifier or resolved tag.
    pub fn asset_dir(&self, release: &str) -> PathBuf {
        self.root.join(path_component(release))
    }

    pub fn asset_path(&self, release: &str, file_name: &str) -> PathBuf {
        self.asset_dir(release).join(path_component(file_name))
    }

    /// Load cached metadata. Missing, unreadable or malformed entries yield `None`.
    pub fn load(&self, id: &ReleaseId) -> Option<ReleaseInfo> {
        let path = self.metadata_path(id);
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::debug!("unreadable release cache {}: {}", path.display(), e);
                }
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!("malformed release cache {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Persist metadata for `id`, creating the metadata directory if needed.
    pub fn store(&self, id: &ReleaseId, info: &ReleaseInfo) -> io::Result<()> {
        let path = self.metadata_path(id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(info).map_err(io::Error::from)?;
        fs::write(&path, json)
    }

    /// Only `latest` expires; metadata of a published tag never changes.
    pub fn is_stale(id: &ReleaseId, info: &ReleaseInfo, now: u64) -> bool {
        id.is_latest() && info.age_secs(now) > LATEST_MAX_AGE_SECS
    }
}
