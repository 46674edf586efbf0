use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use lilium_core::control::ControlCommand;
#[cfg(unix)]
use serde::Serialize;

#[cfg(unix)]
use super::print_json;

#[cfg(unix)]
#[derive(Debug, Serialize)]
struct ControlReport<'a> {
    status: &'static str,
    command: &'static str,
    socket: &'a Path,
}

#[cfg(unix)]
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    running: bool,
    socket: &'a Path,
}

#[cfg(unix)]
pub(super) fn send(socket: &Path, command: ControlCommand, timeout: Duration) -> Result<()> {
    use anyhow::Context;

    let acknowledged = lilium_core::control::send_command(socket, command, timeout)
        .with_context(|| format!("failed to send {command} to {}", socket.display()))?;
    if !acknowledged {
        anyhow::bail!(
            "no palette server acknowledged {command} on {}; is the server running?",
            socket.display()
        );
    }
    print_json(&ControlReport {
        status: "ok",
        command: command.as_str(),
        socket,
    })
}

#[cfg(unix)]
pub(super) fn status(socket: &Path, timeout: Duration) -> Result<()> {
    let running = lilium_core::control::is_server_running(socket, timeout)?;
    print_json(&StatusReport { running, socket })?;
    if !running {
        anyhow::bail!(
            "no palette server on {}; is the server running?",
            socket.display()
        );
    }
    Ok(())
}

#[cfg(not(unix))]
pub(super) fn send(_socket: &Path, command: ControlCommand, _timeout: Duration) -> Result<()> {
    anyhow::bail!("{command} requires a unix domain socket control channel")
}

#[cfg(not(unix))]
pub(super) fn status(_socket: &Path, _timeout: Duration) -> Result<()> {
    anyhow::bail!("status requires a unix domain socket control channel")
}
