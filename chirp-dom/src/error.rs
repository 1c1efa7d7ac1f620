//! Errors raised by the page model.

use thiserror::Error;

/// Page model errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomError {
    /// A timer was requested outside of any tokio runtime.
    #[error("no tokio runtime available to schedule timer")]
    NoRuntime,

    /// The page location could not be parsed.
    #[error("invalid location {href}: {source}")]
    InvalidLocation {
        /// The rejected href.
        href: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}
