// SPDX-License-Identifier: MPL-2.0
//! The upload controller: one selected file, one submission at a time.
//!
//! The controller owns no widgets and runs no futures. Handlers mutate state
//! and hand back the work the caller must schedule (a preview decode, a
//! submission), tagged so late completions can be told apart from current ones.
//!
//! Modes are *idle* and *loading*; the error banner is an overlay on either.

use super::file::SelectedFile;
use super::form::{FieldNames, UploadForm};
use super::preview::PreviewImage;
use crate::error::{Error, SelectionError, SubmissionError, UploadError};
use bytes::Bytes;
use iced::widget::image;

/// Identifies one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(u64);

/// Identifies one accepted selection, for matching preview decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionId(u64);

/// Identifies one file read started from a pick or a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadId(u64);

/// Preview decode the caller should start after an accepted selection.
#[derive(Debug, Clone)]
pub struct PreviewTicket {
    pub selection: SelectionId,
    pub bytes: Vec<u8>,
}

/// Request the caller should send after [`Controller::submit`].
#[derive(Debug, Clone)]
pub struct Submission {
    pub attempt: AttemptId,
    pub form: UploadForm,
}

/// What the original-image pane shows.
#[derive(Debug, Clone, Default)]
pub enum Preview {
    #[default]
    Empty,
    Decoding,
    Ready(PreviewImage),
    /// The file was accepted but could not be decoded locally.
    Unavailable,
}

/// Image returned by the service, with the display handle built from it.
///
/// The handle and `bytes` share one buffer.
#[derive(Debug, Clone)]
pub struct ResultImage {
    bytes: Bytes,
    handle: image::Handle,
}

impl ResultImage {
    pub fn new(body: Vec<u8>) -> Self {
        let bytes = Bytes::from(body);
        let handle = image::Handle::from_bytes(bytes.clone());
        Self { bytes, handle }
    }

    /// The body exactly as received.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn handle(&self) -> &image::Handle {
        &self.handle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Idle,
    Loading(AttemptId),
}

#[derive(Debug, Default)]
pub struct Controller {
    selected: Option<SelectedFile>,
    selection: Option<SelectionId>,
    /// The latest pick whose bytes are still being read.
    pending_read: Option<ReadId>,
    preview: Preview,
    result: Option<ResultImage>,
    flag_enabled: bool,
    mode: Mode,
    error: Option<UploadError>,
    fields: FieldNames,
    counter: u64,
}

impl Controller {
    pub fn new(fields: FieldNames) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    /// Registers a pick whose bytes are about to be read. Any read started
    /// earlier becomes stale.
    ///
    /// # Errors
    ///
    /// [`SelectionError::Busy`] while loading.
    pub fn begin_read(&mut self) -> Result<ReadId, SelectionError> {
        if self.is_loading() {
            return Err(SelectionError::Busy);
        }
        let read = ReadId(self.next_id());
        self.pending_read = Some(read);
        Ok(read)
    }

    /// Claims a finished read. Returns `false` when a later pick superseded
    /// it; the caller must then drop the file.
    pub fn claim_read(&mut self, read: ReadId) -> bool {
        if self.pending_read != Some(read) {
            log::debug!("ignoring stale read {read:?}");
            return false;
        }
        self.pending_read = None;
        true
    }

    /// The read whose file is awaited, if any.
    pub fn pending_read(&self) -> Option<ReadId> {
        self.pending_read
    }

    pub fn is_reading(&self) -> bool {
        self.pending_read.is_some()
    }

    /// Handles a pick from the file dialog or a drop on the window.
    /// Outstanding reads are superseded.
    ///
    /// # Errors
    ///
    /// [`SelectionError::NoFile`] and [`SelectionError::NotAnImage`] clear the
    /// current file and raise the banner. [`SelectionError::Busy`] is returned
    /// while loading and leaves everything untouched.
    pub fn select_file(
        &mut self,
        file: Option<SelectedFile>,
    ) -> Result<PreviewTicket, SelectionError> {
        if self.is_loading() {
            return Err(SelectionError::Busy);
        }
        self.pending_read = None;

        let outcome = match file {
            None => Err(SelectionError::NoFile),
            Some(file) if !file.is_image() => {
                Err(SelectionError::NotAnImage(file.media_type().to_string()))
            }
            Some(file) => Ok(file),
        };

        match outcome {
            Ok(file) => {
                log::info!("selected {file:?}");
                let selection = SelectionId(self.next_id());
                let bytes = file.bytes().to_vec();
                self.selected = Some(file);
                self.selection = Some(selection);
                self.preview = Preview::Decoding;
                self.result = None;
                self.error = None;
                Ok(PreviewTicket { selection, bytes })
            }
            Err(err) => {
                log::info!("selection rejected: {err}");
                self.selected = None;
                self.selection = None;
                if matches!(self.preview, Preview::Decoding) {
                    self.preview = Preview::Empty;
                }
                self.error = Some(err.clone().into());
                Err(err)
            }
        }
    }

    /// Stores a finished preview decode. Returns `false` for stale decodes.
    pub fn preview_decoded(
        &mut self,
        selection: SelectionId,
        outcome: Result<PreviewImage, Error>,
    ) -> bool {
        if self.selection != Some(selection) {
            return false;
        }
        self.preview = match outcome {
            Ok(preview) => Preview::Ready(preview),
            Err(err) => {
                log::warn!("preview decode failed: {err}");
                Preview::Unavailable
            }
        };
        true
    }

    pub fn set_flag(&mut self, enabled: bool) {
        self.flag_enabled = enabled;
    }

    /// Starts a submission of the selected file.
    ///
    /// # Errors
    ///
    /// [`SubmissionError::NoFileSelected`] raises the banner and starts
    /// nothing. [`SubmissionError::InFlight`] while loading and
    /// [`SubmissionError::ReadPending`] while a newer pick is being read leave
    /// everything untouched.
    pub fn submit(&mut self) -> Result<Submission, SubmissionError> {
        if self.is_loading() {
            return Err(SubmissionError::InFlight);
        }
        if self.is_reading() {
            return Err(SubmissionError::ReadPending);
        }
        let Some(file) = self.selected.clone() else {
            self.error = Some(SubmissionError::NoFileSelected.into());
            return Err(SubmissionError::NoFileSelected);
        };

        let attempt = AttemptId(self.next_id());
        log::info!(
            "submitting {} ({} bytes, flag {})",
            file.name(),
            file.len(),
            if self.flag_enabled { "on" } else { "off" }
        );
        self.mode = Mode::Loading(attempt);
        self.error = None;
        let form = UploadForm::build(file, self.flag_enabled, &self.fields);
        Ok(Submission { attempt, form })
    }

    /// Applies the outcome of a submission. Returns `false` if `attempt` is
    /// not the one currently loading.
    pub fn finish_submission(
        &mut self,
        attempt: AttemptId,
        outcome: Result<Vec<u8>, SubmissionError>,
    ) -> bool {
        if self.mode != Mode::Loading(attempt) {
            log::debug!("ignoring outcome of stale attempt {attempt:?}");
            return false;
        }
        self.mode = Mode::Idle;
        // The previous result is superseded either way.
        self.result = None;
        match outcome {
            Ok(bytes) => {
                log::info!("received processed image ({} bytes)", bytes.len());
                self.result = Some(ResultImage::new(bytes));
            }
            Err(err) => {
                log::warn!("submission failed: {err}");
                self.error = Some(err.into());
            }
        }
        true
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn result(&self) -> Option<&ResultImage> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    pub fn flag_enabled(&self) -> bool {
        self.flag_enabled
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.mode, Mode::Loading(_))
    }

    /// The attempt whose outcome is awaited, if any.
    pub fn current_attempt(&self) -> Option<AttemptId> {
        match self.mode {
            Mode::Loading(attempt) => Some(attempt),
            Mode::Idle => None,
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
            && !self.is_reading()
            && self.selected.as_ref().is_some_and(SelectedFile::is_image)
    }

    /// Whether the file picker is enabled.
    pub fn can_select(&self) -> bool {
        !self.is_loading()
    }
}
