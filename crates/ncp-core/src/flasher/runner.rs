//! Side effects of an upload step: waiting, asking the user, running a tool.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use super::FlashCommand;
use crate::error::UploadError;

const PRESS_ENTER: &str = "\n\nPress [Enter] when ready.\n";

pub trait StepRunner {
    fn pause(&mut self, delay: Duration);

    /// Show `message` and block until the user confirms.
    fn confirm(&mut self, message: &str) -> Result<(), UploadError>;

    fn run(&mut self, command: &FlashCommand) -> Result<(), UploadError>;
}

/// Runs steps for real: sleeps, reads Enter from stdin, spawns processes in `project_dir`.
pub struct SystemRunner {
    project_dir: PathBuf,
}

impl SystemRunner {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }
}

impl StepRunner for SystemRunner {
    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }

    fn confirm(&mut self, message: &str) -> Result<(), UploadError> {
        let mut out = io::stdout().lock();
        write!(out, "{}{}", message, PRESS_ENTER).map_err(UploadError::Prompt)?;
        out.flush().map_err(UploadError::Prompt)?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(UploadError::Prompt)?;
        Ok(())
    }

    fn run(&mut self, command: &FlashCommand) -> Result<(), UploadError> {
        command.run(&self.project_dir)
    }
}
