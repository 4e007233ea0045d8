//! Defines the crate-level [`Error`] type returned by rendering operations.
//! Only collaborator failures end up here: lookups that miss (unknown class
//! contexts, formats, partials) are reported as [`None`] instead.

use std::fmt;

/// The result of a fallible rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure of one of the collaborators a render depends on.
#[derive(Debug)]
pub enum Error {
    /// Returned when a content, title, or author filter hook fails.
    Filter(String),

    /// Returned when the permalink resolver fails for an item.
    Permalink { id: u64, message: String },

    /// Returned when a pagination URL can't be produced.
    PageLink(String),

    /// Returned for errors parsing or executing a template format.
    Template(String),

    /// Returned when there is a problem parsing or joining URLs.
    UrlParse(url::ParseError),

    /// Returned when writing markup fails.
    Fmt(fmt::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Filter(message) => write!(f, "content filter: {}", message),
            Error::Permalink { id, message } => {
                write!(f, "resolving permalink for item {}: {}", id, message)
            }
            Error::PageLink(message) => write!(f, "page link: {}", message),
            Error::Template(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
            Error::Fmt(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Filter(_) => None,
            Error::Permalink { .. } => None,
            Error::PageLink(_) => None,
            Error::Template(_) => None,
            Error::UrlParse(err) => Some(err),
            Error::Fmt(err) => Some(err),
        }
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. It allows us to use
    /// the `?` operator for URL parsing and joining functions.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl From<fmt::Error> for Error {
    /// Converts a [`fmt::Error`] into an [`Error`] so `write!` into a
    /// [`String`] can use the `?` operator.
    fn from(err: fmt::Error) -> Error {
        Error::Fmt(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`]. This
    /// allows us to use the `?` operator for fallible template operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}
