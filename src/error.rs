use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
///
/// Always fatal: a bad configuration aborts before any network call.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Authentication failures. Fatal: nothing is collected or mutated after one.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid credentials for {identifier}")]
    InvalidCredentials { identifier: String },

    #[error("session request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected session response: {0}")]
    Response(String),
}

/// A page fetch against a remote collection failed.
///
/// Recovered locally: the collection is truncated at the failed page and
/// marked incomplete, and no mutation runs against it.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("failed to fetch {collection} page at cursor {cursor:?}: {reason}")]
    PageFetch {
        collection: &'static str,
        cursor: Option<String>,
        reason: String,
    },
}

/// A single unlike/delete failed. Counted in the final tally, never aborts
/// the remaining mutations.
#[derive(Error, Debug)]
pub enum MutationError {
    #[error("{op} rejected for {uri}: {reason}")]
    Rejected {
        op: &'static str,
        uri: String,
        reason: String,
    },

    #[error("{op} failed for {uri}: {source}")]
    Transport {
        op: &'static str,
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed record uri: {uri}")]
    MalformedUri { uri: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
