use std::io::{self, BufRead, BufReader, Read, Write};
use std::os::unix::fs::FileTypeExt;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{LiliumError, Result};

use super::{ControlCommand, ControlEffect, PaletteState, REPLY_OK, error_reply};

const MAX_LINE_BYTES: u64 = 256;

/// Unix socket listener for control commands. Removes its socket file on drop.
#[derive(Debug)]
pub struct ControlServer {
    listener: UnixListener,
    path: PathBuf,
    timeout: Duration,
}

impl ControlServer {
    /// Binds `path`, replacing a stale socket left by a dead server.
    pub fn bind(path: impl Into<PathBuf>, timeout: Duration) -> Result<Self> {
        let path = path.into();
        if let Ok(metadata) = std::fs::symlink_metadata(&path) {
            if !metadata.file_type().is_socket() {
                return Err(LiliumError::Control(format!(
                    "{} exists and is not a socket",
                    path.display()
                )));
            }
            if is_server_running(&path, timeout)? {
                return Err(LiliumError::Control(format!(
                    "a palette server is already listening on {}",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "removing stale control socket");
            std::fs::remove_file(&path)?;
        }

        let listener = UnixListener::bind(&path)?;
        info!(path = %path.display(), "control channel listening");
        Ok(Self {
            listener,
            path,
            timeout,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serves connections until a stop command arrives.
    pub fn serve(&self, state: &mut PaletteState) -> Result<()> {
        while self.handle_next(state)? == ControlEffect::Continue {}
        info!(path = %self.path.display(), "control channel stopped");
        Ok(())
    }

    /// Accepts one connection and handles its single command.
    ///
    /// Per-connection failures and transient `accept` errors are logged and
    /// do not stop the server; any other `accept` error is returned.
    pub fn handle_next(&self, state: &mut PaletteState) -> Result<ControlEffect> {
        let stream = match self.listener.accept() {
            Ok((stream, _)) => stream,
            Err(err) if is_transient_accept_error(&err) => {
                warn!(error = %err, "transient accept failure on control socket");
                return Ok(ControlEffect::Continue);
            }
            Err(err) => return Err(err.into()),
        };
        if let Err(err) = stream
            .set_read_timeout(Some(self.timeout))
            .and_then(|()| stream.set_write_timeout(Some(self.timeout)))
        {
            warn!(error = %err, "dropping control connection");
            return Ok(ControlEffect::Continue);
        }

        let line = match read_line(&stream) {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "dropping control connection");
                return Ok(ControlEffect::Continue);
            }
        };

        let (reply, effect) = match line.parse::<ControlCommand>() {
            Ok(command) => {
                let effect = state.apply(command);
                info!(%command, visible = state.is_visible(), "applied control command");
                (REPLY_OK.to_string(), effect)
            }
            Err(err) => {
                warn!(error = %err, "rejected control command");
                (error_reply(&err), ControlEffect::Continue)
            }
        };

        if let Err(err) = write_line(&stream, &reply) {
            warn!(error = %err, "failed to reply on control connection");
        }
        Ok(effect)
    }
}

impl Drop for ControlServer {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path)
            && err.kind() != io::ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), error = %err, "failed to remove control socket");
        }
    }
}

/// Sends `command` and reports whether the server acknowledged it.
///
/// Returns `Ok(false)` when nothing is listening on `path`.
pub fn send_command(path: &Path, command: ControlCommand, timeout: Duration) -> Result<bool> {
    let stream = match UnixStream::connect(path) {
        Ok(stream) => stream,
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused
            ) =>
        {
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    write_line(&stream, command.as_str())?;
    let reply = read_line(&stream)?;
    debug!(%command, reply = reply.as_str(), "control reply");
    Ok(reply == REPLY_OK)
}

pub fn is_server_running(path: &Path, timeout: Duration) -> Result<bool> {
    send_command(path, ControlCommand::Ping, timeout)
}

/// Failures tied to one pending connection rather than the listener.
pub(super) fn is_transient_accept_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}

fn read_line(stream: &UnixStream) -> io::Result<String> {
    let mut line = String::new();
    BufReader::new(stream)
        .take(MAX_LINE_BYTES)
        .read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn write_line(mut stream: &UnixStream, line: &str) -> io::Result<()> {
    stream.write_all(line.as_bytes())?;
    stream.write_all(b"\n")?;
    stream.flush()
}
