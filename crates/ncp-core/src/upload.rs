//! The upload target: resolve the configured firmware, then run each flasher in order.

use std::path::PathBuf;

use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::flasher::{self, StepRunner, PORT_SETTLE_DELAY};
use crate::http::HttpClient;
use crate::release::ReleaseId;
use crate::resolver::Resolver;

/// Asset name prefix of Blynk.NCP firmware images.
pub const FIRMWARE_PREFIX: &str = "BlynkNCP_";

/// Asset pattern for a firmware variant, e.g. `esp32.bin` → `BlynkNCP_esp32.bin`.
pub fn firmware_pattern(firmware: &str) -> String {
    format!("{}{}", FIRMWARE_PREFIX, firmware)
}

/// Resolves the firmware and flashes it. Returns the firmware path that was written.
///
/// The flasher list and the PlatformIO environment are validated before
/// anything is downloaded or run; the first failing flasher stops the upload.
pub fn upload<C, R>(
    cfg: &UploadConfig,
    pioenv: Option<&str>,
    resolver: &Resolver<C>,
    runner: &mut R,
) -> Result<PathBuf, UploadError>
where
    C: HttpClient,
    R: StepRunner,
{
    let flashers = flasher::parse_list(&cfg.flasher)?;
    if flashers.is_empty() {
        return Err(UploadError::NoFlasher);
    }
    if pioenv.is_none() && flashers.iter().any(|f| f.needs_pioenv()) {
        return Err(UploadError::PioEnvNotSet);
    }
    let firmware = cfg
        .firmware
        .as_deref()
        .ok_or(UploadError::FirmwareNotSpecified)?;

    let release = ReleaseId::parse(Some(cfg.firmware_ver.as_str()));
    let path = resolver.resolve(&firmware_pattern(firmware), &release)?;
    tracing::info!("firmware: {}", path.display());

    for f in flashers {
        let command = f.command(cfg, pioenv, &path)?;
        if f.is_serial() {
            runner.pause(PORT_SETTLE_DELAY);
            if let Some(msg) = &cfg.pre_upload_message {
                runner.confirm(msg)?;
            }
        }

        runner.run(&command)?;

        if f.is_serial() {
            if let Some(msg) = &cfg.post_upload_message {
                runner.confirm(msg)?;
            }
        }
    }

    Ok(path)
}
