//! Unified error type.

use thiserror::Error;

/// The error type returned by the service's fallible startup and I/O paths.
///
/// Request-level outcomes (denied access, validation failures, a mail relay
/// that refuses the message) are expressed as rendered pages, never as
/// `Error`s. This type surfaces infrastructure failures such as bad config,
/// an unusable mail address or SMTP URL, a route path `matchit` refuses, or a
/// port that cannot be bound.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid {field} address `{value}`: {source}")]
    Address {
        field: &'static str,
        value: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("invalid bind address `{0}`")]
    Bind(String),

    #[error("invalid route `{path}`: {source}")]
    Route {
        path: String,
        #[source]
        source: matchit::InsertError,
    },

    #[error("mail transport: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("templates: {0}")]
    Template(#[from] tera::Error),
}
