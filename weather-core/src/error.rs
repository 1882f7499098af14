use thiserror::Error;

/// Every way a single weather lookup can fail.
///
/// The `Display` text is exactly what the front-end shows the user, so each
/// variant other than [`FetchError::NoCitySelected`] carries the `Error: ` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The selector still shows the placeholder entry.
    #[error("Please select a city.")]
    NoCitySelected,

    #[error("Error: Unknown city '{0}'. Supported cities: {cities}.", cities = crate::City::names().join(", "))]
    UnknownCity(String),

    /// The provider answered with a non-200 `cod` in its body.
    #[error("Error: {message}")]
    Provider { message: String },

    /// Network, DNS or body-read failure.
    #[error("Error: {0}")]
    Transport(String),

    /// Body was not JSON, or was missing a field we need.
    #[error("Error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
