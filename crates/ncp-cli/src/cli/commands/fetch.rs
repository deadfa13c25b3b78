//! `ncp fetch [firmware] [--release TAG]` – resolve a firmware image into the cache.

use anyhow::{Context, Result};
use ncp_core::checksum;
use ncp_core::config::NcpConfig;
use ncp_core::upload::firmware_pattern;
use ncp_core::ReleaseId;
use std::path::Path;

use super::build_resolver;

pub fn run_fetch(
    cfg: &NcpConfig,
    project_dir: &Path,
    firmware: Option<String>,
    release: Option<String>,
) -> Result<()> {
    let firmware = firmware
        .or_else(|| cfg.upload.firmware.clone())
        .context("no firmware given and upload.firmware not set")?;
    let release = ReleaseId::parse(Some(
        release.as_deref().unwrap_or(&cfg.upload.firmware_ver),
    ));

    let resolver = build_resolver(cfg, project_dir);
    let path = resolver.resolve(&firmware_pattern(&firmware), &release)?;
    let digest = checksum::sha256_path(&path)?;
    tracing::info!(sha256 = %digest, "fetched {}", path.display());
    println!("{}  {}", digest, path.display());
    Ok(())
}
