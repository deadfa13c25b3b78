//! `ncp upload` – resolve the configured firmware and flash it.

use anyhow::Result;
use ncp_core::config::NcpConfig;
use ncp_core::flasher::SystemRunner;
use ncp_core::{upload, UploadError};
use std::path::Path;

use super::build_resolver;

const HINT_NO_FLASHER: &str = "
Please follow the official firmware flashing guide. This is usually provided by the module vendor.
Blynk.NCP is shipped as a combined firmware, so you only need to flash a single file (flash at address 0).

Select the firmware file, corresponding to your module type:
https://docs.blynk.io/en/getting-started/supported-boards#connectivity-modules-supported-by-blynk.ncp
";

pub fn run_upload(cfg: &NcpConfig, project_dir: &Path, env: Option<String>) -> Result<()> {
    let pioenv = env.or_else(|| cfg.upload.pioenv());
    let resolver = build_resolver(cfg, project_dir);
    let mut runner = SystemRunner::new(project_dir);

    match upload::upload(&cfg.upload, pioenv.as_deref(), &resolver, &mut runner) {
        Ok(path) => {
            println!("Flashed {}", path.display());
            Ok(())
        }
        Err(UploadError::NoFlasher) => {
            println!("{}", HINT_NO_FLASHER);
            Err(UploadError::NoFlasher.into())
        }
        Err(e) => Err(e.into()),
    }
}
