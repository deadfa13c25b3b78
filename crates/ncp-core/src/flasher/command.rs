//! A flasher invocation: program plus arguments, run as a child process.

use std::fmt;
use std::path::Path;
use std::process::Command;

use crate::error::UploadError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashCommand {
    program: String,
    args: Vec<String>,
}

impl FlashCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Runs the command in `cwd` with inherited stdio and waits for it.
    pub fn run(&self, cwd: &Path) -> Result<(), UploadError> {
        tracing::info!("running {}", self);
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(cwd)
            .status()
            .map_err(|e| UploadError::FlasherFailed {
                command: self.program.clone(),
                reason: format!("cannot start: {}", e),
            })?;

        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(UploadError::FlasherFailed {
                command: self.to_string(),
                reason,
            });
        }
        Ok(())
    }
}

impl fmt::Display for FlashCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
