// src/exec/command.rs

use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::host::Reloadable;

/// Environment variable carrying the resolved source path to reload commands.
pub const PATH_ENV: &str = "LINKSYNC_RESOURCE_PATH";
/// Environment variable carrying the resource name to reload commands.
pub const NAME_ENV: &str = "LINKSYNC_RESOURCE_NAME";

/// Reloads a resource by running a shell command.
///
/// The command runs to completion on the calling thread; a non-zero exit
/// status is a reload failure carrying the command's trimmed stderr.
#[derive(Debug, Clone)]
pub struct CommandReload {
    name: String,
    cmd: String,
    path: Option<PathBuf>,
}

impl CommandReload {
    pub fn new(name: impl Into<String>, cmd: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
            path,
        }
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    fn shell_command(&self) -> Command {
        // Build a shell command appropriate for the platform.
        let mut c = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd);
            c
        };
        c.env(NAME_ENV, &self.name);
        if let Some(path) = &self.path {
            c.env(PATH_ENV, path);
        }
        c.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        c
    }
}

impl Reloadable for CommandReload {
    fn reload(&self) -> Result<()> {
        info!(resource = %self.name, cmd = %self.cmd, "running reload command");

        let output = self
            .shell_command()
            .output()
            .with_context(|| format!("spawning reload command for '{}'", self.name))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines() {
            debug!(resource = %self.name, "stdout: {line}");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                bail!("reload command exited with {}", output.status);
            }
            bail!("reload command exited with {}: {}", output.status, stderr);
        }

        Ok(())
    }
}
