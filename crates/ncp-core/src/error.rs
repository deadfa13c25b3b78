//! Error types of the resolver and uploader.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::http::HttpError;

/// Failure to obtain release metadata (network, HTTP status, payload shape, cache write).
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("invalid releases API URL {0:?}")]
    BadUrl(String),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("unexpected release payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot write release cache {}: {source}", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot get {release} release info")]
    MetadataFetch {
        release: String,
        #[source]
        source: MetadataError,
    },
    #[error("{pattern} not found in release {tag}")]
    AssetNotFound { pattern: String, tag: String },
    #[error("invalid asset pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("failed to download {url}")]
    Download {
        url: String,
        #[source]
        source: HttpError,
    },
    #[error("cannot store {}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no flasher configured")]
    NoFlasher,
    #[error("firmware not specified (set upload.firmware)")]
    FirmwareNotSpecified,
    #[error("flasher {0} is invalid")]
    InvalidFlasher(String),
    #[error("PlatformIO environment not set (use --env, upload.pioenv or PIOENV)")]
    PioEnvNotSet,
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("{command} failed: {reason}")]
    FlasherFailed { command: String, reason: String },
    #[error("cannot read confirmation: {0}")]
    Prompt(#[source] io::Error),
}
