//! HTTP access used by the resolver.
//!
//! The resolver only depends on the [`HttpClient`] trait; [`CurlClient`] is
//! the libcurl-backed implementation used by the CLI.

mod curl_client;

pub use curl_client::CurlClient;

use std::io::{self, Write};

/// Receive buffer size; download bodies reach the sink in chunks of at most this size.
pub const DOWNLOAD_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Curl(#[from] curl::Error),
    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u32 },
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Blocking GET operations needed to fetch release metadata and assets.
pub trait HttpClient {
    /// GET `url` and return the whole body. Non-2xx responses are errors.
    fn get(&self, url: &str) -> Result<Vec<u8>, HttpError>;

    /// GET `url`, streaming the body into `sink`. Returns the number of bytes written.
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64, HttpError>;
}

pub(crate) fn check_status(url: &str, code: u32) -> Result<(), HttpError> {
    if !(200..300).contains(&code) {
        return Err(HttpError::Status {
            url: url.to_string(),
            code,
        });
    }
    Ok(())
}
