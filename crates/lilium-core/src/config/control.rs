use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

use super::env::{parse_millis_var, read_non_empty_env};

const ENV_SOCKET: &str = "LILIUM_SOCKET";
const ENV_CONTROL_TIMEOUT_MS: &str = "LILIUM_CONTROL_TIMEOUT_MS";
const ENV_USER: &str = "USER";

const DEFAULT_CONTROL_TIMEOUT_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlConfig {
    pub socket_path: PathBuf,
    pub timeout: Duration,
}

impl ControlConfig {
    pub fn from_env() -> Result<Self> {
        Self::parse(
            read_non_empty_env(ENV_SOCKET).as_deref(),
            read_non_empty_env(ENV_CONTROL_TIMEOUT_MS).as_deref(),
            read_non_empty_env(ENV_USER).as_deref(),
        )
    }

    fn parse(socket: Option<&str>, timeout_ms: Option<&str>, user: Option<&str>) -> Result<Self> {
        let socket_path = socket.map_or_else(|| default_socket_path(user), PathBuf::from);
        let timeout_ms =
            parse_millis_var(ENV_CONTROL_TIMEOUT_MS, timeout_ms, DEFAULT_CONTROL_TIMEOUT_MS)?;
        Ok(Self {
            socket_path,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(None),
            timeout: Duration::from_millis(DEFAULT_CONTROL_TIMEOUT_MS),
        }
    }
}

fn default_socket_path(user: Option<&str>) -> PathBuf {
    let user = user
        .map(|value| {
            value
                .chars()
                .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
                .collect::<String>()
        })
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "default".to_string());
    std::env::temp_dir().join(format!("lilium-palette-{user}.sock"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_path_defaults_to_per_user_temp_file() {
        let config = ControlConfig::parse(None, None, Some("ana")).expect("defaults");
        assert_eq!(
            config.socket_path,
            std::env::temp_dir().join("lilium-palette-ana.sock")
        );
        assert_eq!(config.timeout, Duration::from_secs(1));
    }

    #[test]
    fn socket_path_strips_unsafe_user_characters() {
        let config = ControlConfig::parse(None, None, Some("../x y")).expect("defaults");
        assert_eq!(
            config.socket_path,
            std::env::temp_dir().join("lilium-palette-xy.sock")
        );
    }

    #[test]
    fn explicit_socket_and_timeout_override_defaults() {
        let config =
            ControlConfig::parse(Some("/run/palette.sock"), Some("250"), None).expect("explicit");
        assert_eq!(config.socket_path, PathBuf::from("/run/palette.sock"));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn zero_or_garbage_timeout_is_rejected() {
        assert!(ControlConfig::parse(None, Some("0"), None).is_err());
        assert!(ControlConfig::parse(None, Some("soon"), None).is_err());
    }
}
