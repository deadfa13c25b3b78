//! CLI command handlers, one per file.

mod checksum;
mod fetch;
mod info;
mod upload;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub use info::run_info;
pub use upload::run_upload;

use ncp_core::config::NcpConfig;
use ncp_core::http::CurlClient;
use ncp_core::Resolver;
use std::path::Path;

pub(crate) fn build_resolver(cfg: &NcpConfig, project_dir: &Path) -> Resolver<CurlClient> {
    let client = CurlClient::with_token(cfg.resolver.token());
    Resolver::new(client, &cfg.resolver, project_dir)
}
