use thiserror::Error;

/// Name of the environment variable holding the SQLite database path.
pub const DATABASE_URL: &str = "DATABASE_URL";

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// The database path from [`DATABASE_URL`], for callers that did not get an
/// explicit path on the command line.
pub fn database_url() -> Result<String, MissingEnvVarError> {
    get_env_var(DATABASE_URL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_is_named_in_the_error() {
        let err = get_env_var("STATION_SYNC_SURELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("STATION_SYNC_SURELY_UNSET"));
    }
}
