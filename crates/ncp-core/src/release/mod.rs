//! Release metadata as published by the releases API and kept in the cache.

pub mod cache;
mod select;

pub use cache::ReleaseCache;
pub use select::{find_asset, AssetMatcher};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Cached metadata for `latest` is refetched once older than this.
pub const LATEST_MAX_AGE_SECS: u64 = 24 * 60 * 60;

/// Which release to resolve: the moving `latest` pointer or a fixed tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReleaseId {
    Latest,
    Tag(String),
}

impl ReleaseId {
    /// `None`, empty and `"latest"` all mean [`ReleaseId::Latest`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("latest") => ReleaseId::Latest,
            Some(tag) => ReleaseId::Tag(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReleaseId::Latest => "latest",
            ReleaseId::Tag(tag) => tag,
        }
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, ReleaseId::Latest)
    }
}

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One downloadable file of a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// Release metadata plus the time it was fetched.
///
/// Serialized with the API's field names so a cache file is a subset of the
/// API response. `timestamp` is absent in API responses and filled in by the
/// resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    #[serde(rename = "tag_name")]
    pub tag: String,
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub timestamp: u64,
}

impl ReleaseInfo {
    /// Age in seconds relative to `now`; a timestamp in the future counts as zero.
    pub fn age_secs(&self, now: u64) -> u64 {
        now.saturating_sub(self.timestamp)
    }
}

/// Current time in seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
