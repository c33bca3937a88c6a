//! Required environment variable lookups

use thiserror::Error;

/// Errors raised while reading required environment variables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// Variable is not set
    #[error("environment variable {0} is not set")]
    Missing(String),

    /// Variable is set but blank
    #[error("environment variable {0} is empty")]
    Empty(String),
}

/// Read a required variable through an arbitrary lookup
///
/// A blank value counts as an error. Anything else is returned exactly as
/// set, whitespace included.
pub fn lookup_required<F>(name: &str, lookup: F) -> Result<String, EnvError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or_else(|| EnvError::Missing(name.to_string()))?;
    if value.trim().is_empty() {
        return Err(EnvError::Empty(name.to_string()));
    }
    Ok(value)
}
