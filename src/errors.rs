use thiserror::Error;

/// Main error type for the Pokedex client
#[derive(Debug, Error)]
pub enum PokedexError {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The remote gateway could not be built or failed
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
    /// Terminal or stdio failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while talking to the PokeAPI.
///
/// Every variant is collapsed into one user-facing message by the list
/// controller and the detail presenter; the variants exist for logs.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    /// The response body was not the JSON shape we expected
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
    /// A request URL could not be built from the base URL
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A list record's reference URL does not end in a Pokedex number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("reference URL '{url}' has no numeric suffix")]
pub struct MalformedReferenceError {
    pub url: String,
}

/// Errors related to loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid RON
    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
    /// A value is out of range or malformed
    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Type alias for Results using PokedexError
pub type PokedexResult<T> = Result<T, PokedexError>;

/// Type alias for Results using GatewayError
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
