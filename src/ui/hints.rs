//! Remedy hints and fixed notices printed by the resolvers.

/// Hint printed after the CLI probe fails.
pub fn region_remedy(region_env_var: &str) -> String {
    format!(
        "You can also get rid of this message by setting {} or configuring ~/.aws/config with the region",
        region_env_var
    )
}

/// Notice printed when the identity lookup finds no credentials.
pub fn missing_credentials() -> &'static str {
    "INFO: You're missing AWS credentials. Only local services are currently available"
}
