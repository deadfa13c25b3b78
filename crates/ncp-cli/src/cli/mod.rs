//! CLI for fetching and flashing Blynk.NCP firmware.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ncp_core::config::{self, NcpConfig};
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_fetch, run_info, run_upload};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ncp")]
#[command(about = "Fetch Blynk.NCP firmware releases and flash them to the connectivity module", long_about = None)]
pub struct Cli {
    /// Config file (default: <project-dir>/ncp.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project directory holding the cache and flasher tools (default: current dir).
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve the configured firmware and run the configured flashers.
    Upload {
        /// PlatformIO environment for building the on-device flasher.
        #[arg(long, short = 'e', value_name = "PIOENV")]
        env: Option<String>,
    },

    /// Download (or find in cache) a firmware image and print its path.
    Fetch {
        /// Firmware variant, e.g. `esp32.bin` (default: upload.firmware).
        firmware: Option<String>,
        /// Release tag (default: upload.firmware_ver).
        #[arg(long, short = 'r')]
        release: Option<String>,
    },

    /// Show the tag and assets of a release.
    Info {
        /// Release tag (default: latest).
        #[arg(long, short = 'r')]
        release: Option<String>,
    },

    /// Compute SHA-256 of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    fn run(self) -> Result<()> {
        let project_dir = match self.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let cfg = load_config(self.config.as_deref(), &project_dir)?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Upload { env } => run_upload(&cfg, &project_dir, env)?,
            CliCommand::Fetch { firmware, release } => {
                run_fetch(&cfg, &project_dir, firmware, release)?
            }
            CliCommand::Info { release } => run_info(&cfg, &project_dir, release.as_deref())?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}

fn load_config(explicit: Option<&Path>, project_dir: &Path) -> Result<NcpConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            config::load(path)
        }
        None => config::load(&config::config_path(project_dir)),
    }
}

#[cfg(test)]
mod tests;
