//! libcurl-backed [`HttpClient`].

use std::io::{self, Write};
use std::time::Duration;

use curl::easy::{Easy, List};

use super::{check_status, HttpClient, HttpError, DOWNLOAD_CHUNK_SIZE};

const USER_AGENT: &str = concat!("ncp/", env!("CARGO_PKG_VERSION"));

/// Blocking client built on `curl::easy::Easy`. No retries and no overall
/// timeout; only connection establishment is bounded.
#[derive(Debug, Clone, Default)]
pub struct CurlClient {
    token: Option<String>,
}

impl CurlClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `Authorization: Bearer <token>` on metadata requests.
    pub fn with_token(token: Option<String>) -> Self {
        Self { token }
    }

    fn handle(&self, url: &str) -> Result<Easy, curl::Error> {
        let mut easy = Easy::new();
        easy.url(url)?;
        easy.useragent(USER_AGENT)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(30))?;
        Ok(easy)
    }
}

impl HttpClient for CurlClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        let mut easy = self.handle(url)?;

        let mut list = List::new();
        list.append("Accept: application/vnd.github+json")?;
        if let Some(token) = &self.token {
            list.append(&format!("Authorization: Bearer {}", token.trim()))?;
        }
        easy.http_headers(list)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        check_status(url, easy.response_code()?)?;
        Ok(body)
    }

    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64, HttpError> {
        let mut easy = self.handle(url)?;
        easy.buffer_size(DOWNLOAD_CHUNK_SIZE)?;
        // Error bodies must not reach the sink.
        easy.fail_on_error(true)?;

        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;
        let result = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match sink.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("download write failed: {}", e);
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(HttpError::Io(e));
        }
        if let Err(e) = result {
            if e.is_http_returned_error() {
                check_status(url, easy.response_code()?)?;
            }
            return Err(HttpError::Curl(e));
        }

        check_status(url, easy.response_code()?)?;
        sink.flush()?;
        Ok(written)
    }
}
