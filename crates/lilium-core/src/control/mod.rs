//! Line-based control channel used to drive a running palette.
//!
//! Clients send one newline-terminated command per connection and read a
//! single reply line: `OK` for known commands, `ERR <CODE>` otherwise.

use std::fmt;
use std::str::FromStr;

use crate::error::{LiliumError, Result};

#[cfg(unix)]
mod socket;

#[cfg(unix)]
pub use socket::{ControlServer, is_server_running, send_command};

pub const REPLY_OK: &str = "OK";
pub const REPLY_ERR_PREFIX: &str = "ERR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCommand {
    Toggle,
    Show,
    Hide,
    Stop,
    Ping,
}

impl ControlCommand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Toggle => "TOGGLE",
            Self::Show => "SHOW",
            Self::Hide => "HIDE",
            Self::Stop => "STOP",
            Self::Ping => "PING",
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlCommand {
    type Err = LiliumError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TOGGLE" => Ok(Self::Toggle),
            "SHOW" => Ok(Self::Show),
            "HIDE" => Ok(Self::Hide),
            "STOP" | "QUIT" => Ok(Self::Stop),
            "PING" => Ok(Self::Ping),
            other => Err(LiliumError::Control(format!("unknown command '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEffect {
    Continue,
    Shutdown,
}

/// Visibility of the palette window as seen by the control channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaletteState {
    visible: bool,
}

impl PaletteState {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn apply(&mut self, command: ControlCommand) -> ControlEffect {
        match command {
            ControlCommand::Toggle => self.visible = !self.visible,
            ControlCommand::Show => self.visible = true,
            ControlCommand::Hide => self.visible = false,
            ControlCommand::Ping => {}
            ControlCommand::Stop => return ControlEffect::Shutdown,
        }
        ControlEffect::Continue
    }
}

#[must_use]
pub fn error_reply(err: &LiliumError) -> String {
    format!("{REPLY_ERR_PREFIX} {}", err.code())
}
