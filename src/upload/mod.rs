// SPDX-License-Identifier: MPL-2.0
//! Selecting an image and submitting it to the pixelation service.
//!
//! - [`file`] - the selected file and its declared media type
//! - [`form`] - the multipart payload
//! - [`race`] - first-to-settle combinator and timeout
//! - [`client`] - the processor port and its HTTP implementation
//! - [`preview`] - local decode for the original-image pane
//! - [`controller`] - the state machine tying it together

pub mod client;
pub mod controller;
pub mod file;
pub mod form;
pub mod preview;
pub mod race;

pub use client::{submit_with_timeout, HttpProcessor, ImageProcessor, ServiceStatus};
pub use controller::{
    AttemptId, Controller, Preview, PreviewTicket, ReadId, ResultImage, SelectionId, Submission,
};
pub use file::SelectedFile;
pub use form::{FieldNames, UploadForm};
