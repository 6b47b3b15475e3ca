use crate::cli::args::CliArgs;

/// Checks the raw command-line values that can be rejected before any
/// config file is read.
pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.endpoint.as_deref() {
        reqwest::Url::parse(raw).map_err(|e| format!("invalid --endpoint '{raw}': {e}"))?;
    }
    Ok(())
}

/// Checks the values left once command-line flags and the config file are merged.
pub fn validate_merged(
    page: usize,
    timeout: Option<u64>,
    interactive: bool,
    output: Option<&str>,
) -> Result<(), String> {
    if page == 0 {
        return Err("invalid page, expected a positive integer".to_string());
    }
    if timeout == Some(0) {
        return Err("invalid timeout, expected a positive number of seconds".to_string());
    }
    if interactive && output.is_some() {
        return Err("use either --interactive or --output, not both".to_string());
    }
    Ok(())
}
