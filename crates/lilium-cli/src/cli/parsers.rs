use lilium_core::error::parse_limit;

pub(super) fn parse_limit_arg(raw: &str) -> std::result::Result<usize, String> {
    parse_limit(raw).map_err(|err| err.to_string())
}

pub(super) fn parse_min_one_usize(raw: &str) -> std::result::Result<usize, String> {
    let value = parse_limit_arg(raw)?;
    if value == 0 {
        return Err("value must be >= 1".to_string());
    }
    Ok(value)
}
