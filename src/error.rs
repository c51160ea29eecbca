// SPDX-License-Identifier: MPL-2.0
//! Error types shared across the crate.
//!
//! User-facing failures come in two kinds, [`SelectionError`] and
//! [`SubmissionError`]. Both map to a Fluent message key so the banner can be
//! localized; neither is ever fatal to the running window.

use thiserror::Error;

/// Crate-level error for setup and I/O work that happens outside the
/// upload flow (config files, HTTP client construction, file reads).
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("HTTP Error: {0}")]
    Http(String),
}

/// Why a file could not become the selected file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The picker was closed or returned nothing.
    #[error("no file selected")]
    NoFile,

    /// The declared media type is not in the `image/` category.
    #[error("not an image file (declared type: {0})")]
    NotAnImage(String),

    /// A submission is in flight; selection is locked until it settles.
    #[error("a submission is in progress")]
    Busy,
}

impl SelectionError {
    /// Returns the i18n message key for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SelectionError::NoFile | SelectionError::NotAnImage(_) => "error-invalid-selection",
            SelectionError::Busy => "error-busy",
        }
    }
}

/// Why a submission produced no result image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Submit was pressed with nothing selected. No request is made.
    #[error("no image selected")]
    NoFileSelected,

    /// A submission is already in flight.
    #[error("a submission is already in progress")]
    InFlight,

    /// A newer pick is still being read.
    #[error("the chosen file is still being read")]
    ReadPending,

    /// The request could not be built or sent, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The timer fired before the service answered.
    #[error("no response within {0} ms")]
    Timeout(u64),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {0}")]
    Status(u16),
}

impl SubmissionError {
    /// Returns the i18n message key for this error.
    ///
    /// Network failures, timeouts and bad statuses share one generic message.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SubmissionError::NoFileSelected => "error-no-file",
            SubmissionError::InFlight | SubmissionError::ReadPending => "error-busy",
            SubmissionError::Transport(_)
            | SubmissionError::Timeout(_)
            | SubmissionError::Status(_) => "error-submission",
        }
    }
}

/// The error overlay shown by the upload screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl UploadError {
    /// Returns the i18n message key for the banner.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            UploadError::Selection(err) => err.i18n_key(),
            UploadError::Submission(err) => err.i18n_key(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
