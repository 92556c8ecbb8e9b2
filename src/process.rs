//! Subprocess helpers shared by the provisioner, the installer and the host probe
//!
//! A failing subprocess is reported with its full command line and exit status,
//! nothing else is added on top.

use std::process::{Command, Output};

use tracing::{debug, warn};

use crate::error::{BdistVenvError, Result};

/// Render a command as a single shell-like line for logs and error messages
pub fn display_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command with captured output, failing on a non-zero exit.
///
/// Captured stderr of a failed command is logged before the error is returned.
pub fn run_captured(cmd: &mut Command) -> Result<Output> {
    let command = display_command(cmd);
    debug!(%command, "running");

    let output = cmd
        .output()
        .map_err(|source| BdistVenvError::CommandSpawn {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            warn!("{}", line);
        }
        return Err(BdistVenvError::CommandFailed {
            command,
            status: output.status,
        });
    }

    Ok(output)
}

/// Run a command with stdio inherited from this process, failing on a non-zero exit
pub fn run_inherited(cmd: &mut Command) -> Result<()> {
    let command = display_command(cmd);
    debug!(%command, "running");

    let status = cmd
        .status()
        .map_err(|source| BdistVenvError::CommandSpawn {
            command: command.clone(),
            source,
        })?;

    if !status.success() {
        return Err(BdistVenvError::CommandFailed { command, status });
    }

    Ok(())
}
