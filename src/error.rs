//! Defines the [`Error`] type shared by every stage of a page build.
//!
//! A missing optional asset (license markup, long sequence narrative) has no
//! variant here: the component that detects it substitutes a placeholder or
//! drops the section.

use std::io;
use std::path::PathBuf;

use crate::locale::Locale;

/// The result of a fallible build operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading site resources or building a page.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A species code, named sequence, or similar keyed item is absent.
    #[error("{what} `{key}` not found")]
    NotFound { what: &'static str, key: String },

    /// A placement page was requested for a species that is not part of the
    /// placement exercise.
    #[error("species `{code}` is not part of the placement exercise")]
    InvalidState { code: String },

    /// An external resource is structurally broken.
    #[error("malformed content in `{}`: {reason}", .path.display())]
    MalformedContent { path: PathBuf, reason: &'static str },

    /// A text bundle lacks a key that a page needs.
    #[error("text `{key}` missing from bundle `{}`", .bundle.display())]
    MissingText { bundle: PathBuf, key: String },

    /// A locale was referenced that is not part of the configuration.
    #[error("locale `{0}` is not configured")]
    UnknownLocale(Locale),

    /// Returned when a locale identifier isn't two ASCII letters.
    #[error("invalid locale `{0}`; expected two ASCII letters")]
    InvalidLocale(String),

    /// The record store holds the same species code twice.
    #[error("species code `{code}` appears more than once in `{}`", .path.display())]
    DuplicateRecord { path: PathBuf, code: String },

    /// A path that has to be absolute is not.
    #[error("path `{}` is not absolute", .0.display())]
    RelativePath(PathBuf),

    /// A relative link between two paths can't be expressed.
    #[error("can't link to `{}` from `{}`", .target.display(), .from.display())]
    Unrelatable { target: PathBuf, from: PathBuf },

    /// A link inside transcluded markup couldn't be parsed.
    #[error("invalid link `{link}`: {source}")]
    Link {
        link: String,
        #[source]
        source: url::ParseError,
    },

    /// Returned for I/O problems on a specific file.
    #[error("`{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Returned when the record store can't be parsed.
    #[error("reading records `{}`: {source}", .path.display())]
    Records {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Returned when a text bundle can't be parsed.
    #[error("reading text bundle `{}`: {source}", .path.display())]
    Texts {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Error {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_found(what: &'static str, key: impl Into<String>) -> Error {
        Error::NotFound {
            what,
            key: key.into(),
        }
    }
}
