use crate::error::{LiliumError, Result, parse_limit};

#[must_use]
pub(super) fn read_non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Unset or blank resolves to `default_value`; anything else must parse as a
/// non-negative integer of at least `min_value`.
pub(super) fn parse_limit_var(
    name: &str,
    raw: Option<&str>,
    default_value: usize,
    min_value: usize,
) -> Result<usize> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(default_value);
    };
    let value = parse_limit(raw).map_err(|err| match err {
        LiliumError::InvalidLimit(message) => LiliumError::InvalidLimit(format!("{name}: {message}")),
        other => other,
    })?;
    if value < min_value {
        return Err(LiliumError::InvalidLimit(format!(
            "{name}: must be >= {min_value}, got {value}"
        )));
    }
    Ok(value)
}

pub(super) fn parse_millis_var(name: &str, raw: Option<&str>, default_value: u64) -> Result<u64> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(default_value);
    };
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(LiliumError::Validation(format!(
            "invalid {name}: {raw} (expected a positive number of milliseconds)"
        ))),
    }
}
