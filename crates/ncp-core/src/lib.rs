//! Fetch Blynk.NCP firmware releases and flash them to the connectivity module.

pub mod checksum;
pub mod config;
pub mod error;
pub mod flasher;
pub mod http;
pub mod logging;
pub mod release;
pub mod resolver;
pub mod sanitize;
pub mod storage;
pub mod upload;

pub use error::{MetadataError, ResolveError, UploadError};
pub use release::{Asset, ReleaseId, ReleaseInfo};
pub use resolver::Resolver;
