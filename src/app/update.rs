// SPDX-License-Identifier: MPL-2.0
//! Message handlers for `App::update`.
//!
//! Handlers mutate the controller and return the Iced tasks that carry out
//! the side effects: file dialog, file reads, preview decodes, the submission
//! and the health probe.

use super::Message;
use crate::config::{self, Config};
use crate::error::{Error, SubmissionError};
use crate::i18n::fluent::I18n;
use crate::ui::widgets::animated_spinner;
use crate::upload::client::{submit_with_timeout, HttpProcessor, ServiceStatus};
use crate::upload::controller::{AttemptId, Controller, ReadId, SelectionId, Submission};
use crate::upload::file::{SelectedFile, IMAGE_EXTENSIONS};
use crate::upload::preview::{decode_preview_async, PreviewImage};
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use unic_langid::LanguageIdentifier;

/// Mutable view of the `App` fields the handlers touch.
pub struct UpdateContext<'a> {
    pub i18n: &'a mut I18n,
    pub config: &'a mut Config,
    pub config_dir: Option<&'a PathBuf>,
    pub controller: &'a mut Controller,
    pub processor: Option<&'a Arc<HttpProcessor>>,
    pub timeout: Duration,
    pub service_status: &'a mut ServiceStatus,
    pub spinner_rotation: &'a mut f32,
    pub config_warning: &'a mut Option<String>,
}

/// Opens the native picker. Ignored while loading.
pub fn handle_choose_file(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if !ctx.controller.can_select() {
        return Task::none();
    }
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .add_filter("All files", &["*"])
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::FileChosen,
    )
}

/// Handles the dialog result. A cancelled dialog counts as an empty selection.
pub fn handle_file_chosen(ctx: &mut UpdateContext<'_>, path: Option<PathBuf>) -> Task<Message> {
    match path {
        Some(path) => handle_path(ctx, path),
        None => {
            let _ = ctx.controller.select_file(None);
            Task::none()
        }
    }
}

/// Handles a window file drop.
pub fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    if !ctx.controller.can_select() {
        log::info!("ignoring drop of {} while loading", path.display());
        return Task::none();
    }
    handle_path(ctx, path)
}

/// Rejects non-images by extension up front; reads images off the UI thread.
///
/// Each path gets a [`ReadId`] so only the latest pick can land.
pub fn handle_path(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    let Ok(read) = ctx.controller.begin_read() else {
        log::info!("ignoring {} while loading", path.display());
        return Task::none();
    };
    let described = SelectedFile::unread(&path);
    if !described.is_image() {
        return handle_file_read(ctx, read, Ok(described));
    }
    Task::perform(
        async move { SelectedFile::read(&path).await },
        move |result| Message::FileRead { read, result },
    )
}

pub fn handle_file_read(
    ctx: &mut UpdateContext<'_>,
    read: ReadId,
    result: Result<SelectedFile, Error>,
) -> Task<Message> {
    if !ctx.controller.claim_read(read) {
        return Task::none();
    }
    let file = match result {
        Ok(file) => Some(file),
        Err(err) => {
            log::warn!("could not read selected file: {err}");
            None
        }
    };

    match ctx.controller.select_file(file) {
        Ok(ticket) => {
            let selection = ticket.selection;
            Task::perform(decode_preview_async(ticket.bytes), move |result| {
                Message::PreviewDecoded { selection, result }
            })
        }
        Err(_) => Task::none(),
    }
}

pub fn handle_preview_decoded(
    ctx: &mut UpdateContext<'_>,
    selection: SelectionId,
    result: Result<PreviewImage, Error>,
) -> Task<Message> {
    ctx.controller.preview_decoded(selection, result);
    Task::none()
}

pub fn handle_submit(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Ok(Submission { attempt, form }) = ctx.controller.submit() else {
        return Task::none();
    };
    *ctx.spinner_rotation = 0.0;

    let Some(processor) = ctx.processor.cloned() else {
        ctx.controller.finish_submission(
            attempt,
            Err(SubmissionError::Transport("no usable endpoint configured".into())),
        );
        return Task::none();
    };

    let timeout = ctx.timeout;
    Task::perform(
        submit_with_timeout(processor, form, timeout),
        move |result| Message::SubmissionFinished { attempt, result },
    )
}

pub fn handle_submission_finished(
    ctx: &mut UpdateContext<'_>,
    attempt: AttemptId,
    result: Result<Vec<u8>, SubmissionError>,
) -> Task<Message> {
    ctx.controller.finish_submission(attempt, result);
    Task::none()
}

pub fn handle_check_health(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(processor) = ctx.processor.cloned() else {
        *ctx.service_status = ServiceStatus::Offline;
        return Task::none();
    };
    *ctx.service_status = ServiceStatus::Checking;
    Task::perform(
        async move { processor.check_health().await },
        Message::HealthChecked,
    )
}

pub fn handle_dismiss_config_warning(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    *ctx.config_warning = None;
    Task::none()
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.controller.is_loading() {
        *ctx.spinner_rotation = animated_spinner::advance(*ctx.spinner_rotation);
    }
    Task::none()
}

/// Switches the UI language and persists the choice.
pub fn handle_language_selected(ctx: &mut UpdateContext<'_>, locale: String) -> Task<Message> {
    let Ok(id) = locale.parse::<LanguageIdentifier>() else {
        log::warn!("ignoring invalid locale {locale}");
        return Task::none();
    };
    ctx.i18n.set_locale(id);
    ctx.config.general.language = Some(locale);

    if let Err(err) = config::save_with_override(ctx.config, ctx.config_dir.cloned()) {
        log::warn!("could not save settings: {err}");
    }
    Task::none()
}
