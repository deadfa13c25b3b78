//! `ncp info [--release TAG]` – show a release's tag and assets.

use anyhow::Result;
use ncp_core::config::NcpConfig;
use ncp_core::ReleaseId;
use std::path::Path;

use super::build_resolver;

pub fn run_info(cfg: &NcpConfig, project_dir: &Path, release: Option<&str>) -> Result<()> {
    let id = ReleaseId::parse(release);
    let resolver = build_resolver(cfg, project_dir);
    let info = resolver.release_info(&id)?;

    println!("{} {} ({})", cfg.resolver.repo, info.tag, id);
    if info.assets.is_empty() {
        println!("  (no assets)");
    }
    for asset in &info.assets {
        println!("  {}", asset.name);
    }
    Ok(())
}
