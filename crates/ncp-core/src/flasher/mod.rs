//! External flashing tools and the commands used to drive them.

mod command;
mod runner;

pub use command::FlashCommand;
pub use runner::{StepRunner, SystemRunner};

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::config::UploadConfig;
use crate::error::UploadError;

/// Delay before serial flashers run, so the port re-enumerates after the
/// on-device flasher reboots the module.
pub const PORT_SETTLE_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flasher {
    /// Builds and uploads the `tools/BlynkNcpFlasher` PlatformIO project, which
    /// turns the host MCU into a serial bridge to the NCP.
    BlynkNcpFlasher,
    /// `esptool.py write_flash` through PlatformIO's packaged esptool.
    Esptool,
    /// `tools/flash_wio_terminal.py` for the Wio Terminal's RTL8720 module.
    WioTerminal,
}

impl Flasher {
    pub fn name(&self) -> &'static str {
        match self {
            Flasher::BlynkNcpFlasher => "BlynkNcpFlasher",
            Flasher::Esptool => "esptool",
            Flasher::WioTerminal => "flash_wio_terminal",
        }
    }

    /// Serial flashers wait for the port and show the pre/post upload messages.
    pub fn is_serial(&self) -> bool {
        !matches!(self, Flasher::BlynkNcpFlasher)
    }

    /// Whether [`Flasher::command`] needs a PlatformIO environment.
    pub fn needs_pioenv(&self) -> bool {
        matches!(self, Flasher::BlynkNcpFlasher)
    }

    /// The command writing `firmware` with this flasher.
    pub fn command(
        &self,
        cfg: &UploadConfig,
        pioenv: Option<&str>,
        firmware: &Path,
    ) -> Result<FlashCommand, UploadError> {
        let firmware = firmware.to_string_lossy();
        let cmd = match self {
            Flasher::BlynkNcpFlasher => {
                let env = pioenv.ok_or(UploadError::PioEnvNotSet)?;
                FlashCommand::new("pio").args([
                    "run",
                    "-d",
                    "tools/BlynkNcpFlasher",
                    "-e",
                    env,
                    "--target",
                    "upload",
                ])
            }
            Flasher::Esptool => {
                let mut cmd = FlashCommand::new("pio").args([
                    "pkg",
                    "exec",
                    "-p",
                    "tool-esptoolpy",
                    "--",
                    "esptool.py",
                ]);
                if !cfg.use_stub {
                    cmd = cmd.arg("--no-stub");
                }
                cmd = cmd
                    .args(["--baud", cfg.upload_speed.as_str()])
                    .args(["--before", cfg.before_upload()])
                    .args(["--after", cfg.after_upload()])
                    .args(["write_flash", "--flash_size", "detect"]);
                if cfg.erase_all {
                    cmd = cmd.arg("--erase-all");
                }
                cmd.args(["0x0", &*firmware])
            }
            Flasher::WioTerminal => {
                FlashCommand::new("python3").args(["tools/flash_wio_terminal.py", &*firmware])
            }
        };
        Ok(cmd)
    }
}

impl fmt::Display for Flasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Flasher {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BlynkNcpFlasher" => Ok(Flasher::BlynkNcpFlasher),
            "esptool" => Ok(Flasher::Esptool),
            "flash_wio_terminal" => Ok(Flasher::WioTerminal),
            other => Err(UploadError::InvalidFlasher(other.to_string())),
        }
    }
}

/// Splits the comma-separated flasher list, trimming items and dropping empty ones.
pub fn split_list(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parses the flasher list; fails on the first unknown name.
pub fn parse_list(list: &str) -> Result<Vec<Flasher>, UploadError> {
    split_list(list).into_iter().map(str::parse).collect()
}
