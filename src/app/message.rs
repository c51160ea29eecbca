// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::{Error, SubmissionError};
use crate::upload::client::ServiceStatus;
use crate::upload::controller::{AttemptId, ReadId, SelectionId};
use crate::upload::file::SelectedFile;
use crate::upload::preview::PreviewImage;
use std::path::PathBuf;
use std::time::Instant;

/// Messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Open the native file dialog.
    ChooseFile,
    /// Result from the file dialog; `None` when it was closed without a pick.
    FileChosen(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    FileRead {
        read: ReadId,
        result: Result<SelectedFile, Error>,
    },
    PreviewDecoded {
        selection: SelectionId,
        result: Result<PreviewImage, Error>,
    },
    ToggleFlag(bool),
    Submit,
    SubmissionFinished {
        attempt: AttemptId,
        result: Result<Vec<u8>, SubmissionError>,
    },
    CheckHealth,
    HealthChecked(ServiceStatus),
    DismissError,
    DismissConfigWarning,
    LanguageSelected(String),
    Tick(Instant), // Spinner animation while loading
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP47 form (e.g. `es`).
    pub lang: Option<String>,
    /// Endpoint URL overriding the one from `settings.toml`.
    pub endpoint: Option<String>,
    /// Config directory override (`--config-dir`).
    pub config_dir: Option<String>,
    /// Image to preselect at startup.
    pub file_path: Option<String>,
}
