// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct owns the upload controller, the HTTP processor, the
//! localization bundle and the loaded settings, and turns messages into
//! controller calls plus the tasks that perform their side effects.

mod message;
pub mod paths;
mod subscription;
mod update;

pub use message::{Flags, Message};

use crate::config::{self, Config, EndpointConfig};
use crate::i18n::fluent::I18n;
use crate::ui::theming::ThemeMode;
use crate::ui::upload_view;
use crate::upload::client::{HttpProcessor, ServiceStatus};
use crate::upload::controller::Controller;
use crate::upload::form::FieldNames;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    /// `--config-dir` override, reused when saving.
    config_dir: Option<PathBuf>,
    theme_mode: ThemeMode,
    controller: Controller,
    /// `None` when the configured endpoint is not a valid URL.
    processor: Option<Arc<HttpProcessor>>,
    timeout: Duration,
    service_status: ServiceStatus,
    spinner_rotation: f32,
    /// Fluent key of a startup warning shown until dismissed.
    config_warning: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("endpoint", &self.processor.as_ref().map(|p| p.endpoint().as_str()))
            .field("loading", &self.controller.is_loading())
            .field("service_status", &self.service_status)
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: f32 = 960.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 680.0;
pub const MIN_WINDOW_WIDTH: f32 = 640.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 wants an `Fn` boot closure; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads settings, builds the processor and kicks off the health probe
    /// and, when a path was given on the command line, its selection.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.clone().map(PathBuf::from);
        let (config, config_warning) = config::load_with_override(config_dir.clone());
        let i18n = I18n::new(flags.lang.clone(), &config);

        // The CLI endpoint applies to this run only and is never saved.
        let endpoint = match flags.endpoint {
            Some(url) => EndpointConfig {
                url,
                ..config.endpoint.clone()
            },
            None => config.endpoint.clone(),
        };
        let processor = match HttpProcessor::new(&endpoint) {
            Ok(processor) => {
                log::info!("submitting to {}", processor.endpoint());
                Some(Arc::new(processor))
            }
            Err(err) => {
                log::error!("{err}");
                None
            }
        };

        let mut app = App {
            i18n,
            theme_mode: config.general.theme_mode,
            controller: Controller::new(FieldNames::from(&endpoint)),
            processor,
            timeout: endpoint.timeout(),
            service_status: ServiceStatus::default(),
            spinner_rotation: 0.0,
            config_warning,
            config,
            config_dir,
        };

        let mut tasks = vec![app.update(Message::CheckHealth)];
        if let Some(path) = flags.file_path {
            tasks.push(app.update(Message::FileChosen(Some(PathBuf::from(path)))));
        }

        (app, Task::batch(tasks))
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.controller.selected() {
            Some(file) => format!("{} - {app_name}", file.name()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.controller.is_loading()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &mut self.i18n,
            config: &mut self.config,
            config_dir: self.config_dir.as_ref(),
            controller: &mut self.controller,
            processor: self.processor.as_ref(),
            timeout: self.timeout,
            service_status: &mut self.service_status,
            spinner_rotation: &mut self.spinner_rotation,
            config_warning: &mut self.config_warning,
        };

        match message {
            Message::ChooseFile => update::handle_choose_file(&mut ctx),
            Message::FileChosen(path) => update::handle_file_chosen(&mut ctx, path),
            Message::FileDropped(path) => update::handle_file_dropped(&mut ctx, path),
            Message::FileRead { read, result } => update::handle_file_read(&mut ctx, read, result),
            Message::PreviewDecoded { selection, result } => {
                update::handle_preview_decoded(&mut ctx, selection, result)
            }
            Message::ToggleFlag(enabled) => {
                ctx.controller.set_flag(enabled);
                Task::none()
            }
            Message::Submit => update::handle_submit(&mut ctx),
            Message::SubmissionFinished { attempt, result } => {
                update::handle_submission_finished(&mut ctx, attempt, result)
            }
            Message::CheckHealth => update::handle_check_health(&mut ctx),
            Message::HealthChecked(status) => {
                *ctx.service_status = status;
                Task::none()
            }
            Message::DismissError => {
                ctx.controller.dismiss_error();
                Task::none()
            }
            Message::DismissConfigWarning => update::handle_dismiss_config_warning(&mut ctx),
            Message::LanguageSelected(locale) => {
                update::handle_language_selected(&mut ctx, locale)
            }
            Message::Tick(_) => update::handle_tick(&mut ctx),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        upload_view::view(upload_view::ViewContext {
            i18n: &self.i18n,
            controller: &self.controller,
            service_status: self.service_status,
            spinner_rotation: self.spinner_rotation,
            config_warning: self.config_warning.as_deref(),
            is_dark_theme: self.theme_mode.is_dark(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_LOAD_WARNING_KEY;
    use crate::error::{Error, SubmissionError};
    use crate::upload::controller::AttemptId;
    use crate::upload::file::SelectedFile;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn flags_in(dir: &TempDir) -> Flags {
        Flags {
            lang: Some("en-US".into()),
            config_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..Flags::default()
        }
    }

    fn new_app() -> (TempDir, App) {
        let dir = tempdir().expect("temp dir");
        let (app, _task) = App::new(flags_in(&dir));
        (dir, app)
    }

    fn png() -> SelectedFile {
        SelectedFile::new("kid.png", "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    /// Delivers a finished read of `file` for a freshly started pick.
    fn read_file(app: &mut App, file: SelectedFile) {
        let read = app.controller.begin_read().expect("idle");
        let _ = app.update(Message::FileRead {
            read,
            result: Ok(file),
        });
    }

    /// Selects `png()` and starts a submission, returning the attempt.
    fn start_submission(app: &mut App) -> AttemptId {
        read_file(app, png());
        let _ = app.update(Message::Submit);
        app.controller.current_attempt().expect("attempt in flight")
    }

    #[test]
    fn new_starts_idle_with_defaults() {
        let (_dir, app) = new_app();
        assert!(!app.controller.is_loading());
        assert!(!app.controller.can_submit());
        assert!(app.config_warning.is_none());
        assert_eq!(app.timeout, Duration::from_millis(30_000));
        assert_eq!(app.service_status, ServiceStatus::Checking);
        assert_eq!(
            app.processor.as_ref().map(|p| p.endpoint().as_str()),
            Some("http://localhost:8000/pixelar_menores")
        );
    }

    #[test]
    fn unreadable_settings_show_warning_and_use_defaults() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join("settings.toml"), "endpoint = [[[").expect("write");
        let (app, _task) = App::new(flags_in(&dir));

        assert_eq!(app.config_warning.as_deref(), Some(CONFIG_LOAD_WARNING_KEY));
        assert_eq!(app.config, Config::default());
    }

    #[test]
    fn settings_configure_endpoint_and_timeout() {
        let dir = tempdir().expect("temp dir");
        fs::write(
            dir.path().join("settings.toml"),
            "[endpoint]\nurl = \"http://gateway:9000/pixelar\"\ntimeout_ms = 10\n",
        )
        .expect("write");
        let (app, _task) = App::new(flags_in(&dir));

        assert_eq!(
            app.processor.as_ref().map(|p| p.endpoint().as_str()),
            Some("http://gateway:9000/pixelar")
        );
        // Clamped to the minimum.
        assert_eq!(app.timeout, Duration::from_millis(1_000));
    }

    #[test]
    fn cli_endpoint_overrides_without_touching_settings() {
        let dir = tempdir().expect("temp dir");
        let flags = Flags {
            endpoint: Some("http://127.0.0.1:1234/up".into()),
            ..flags_in(&dir)
        };
        let (app, _task) = App::new(flags);

        assert_eq!(
            app.processor.as_ref().map(|p| p.endpoint().as_str()),
            Some("http://127.0.0.1:1234/up")
        );
        assert_eq!(app.config.endpoint, EndpointConfig::default());
    }

    #[test]
    fn invalid_endpoint_fails_submissions_with_generic_error() {
        let dir = tempdir().expect("temp dir");
        let flags = Flags {
            endpoint: Some("not a url".into()),
            ..flags_in(&dir)
        };
        let (mut app, _task) = App::new(flags);
        assert!(app.processor.is_none());
        assert_eq!(app.service_status, ServiceStatus::Offline);

        read_file(&mut app, png());
        let _ = app.update(Message::Submit);
        assert!(!app.controller.is_loading());
        assert_eq!(
            app.controller.error().map(|e| e.i18n_key()),
            Some("error-submission")
        );
    }

    #[test]
    fn reading_an_image_selects_it() {
        let (_dir, mut app) = new_app();
        read_file(&mut app, png());
        assert!(app.controller.can_submit());
        assert_eq!(app.title(), "kid.png - Iced Pixelate");
    }

    #[test]
    fn unreadable_file_is_a_selection_error() {
        let (_dir, mut app) = new_app();
        let read = app.controller.begin_read().expect("idle");
        let _ = app.update(Message::FileRead {
            read,
            result: Err(Error::Io("denied".into())),
        });
        assert!(!app.controller.can_submit());
        assert_eq!(
            app.controller.error().map(|e| e.i18n_key()),
            Some("error-invalid-selection")
        );
    }

    #[test]
    fn cancelled_dialog_is_a_selection_error() {
        let (_dir, mut app) = new_app();
        let _ = app.update(Message::FileChosen(None));
        assert!(app.controller.error().is_some());
    }

    #[test]
    fn choosing_a_non_image_path_is_rejected_without_reading() {
        let (_dir, mut app) = new_app();
        // The path does not exist; rejection happens before any read.
        let _ = app.update(Message::FileChosen(Some(PathBuf::from("/nowhere/notes.txt"))));
        assert_eq!(
            app.controller.error().map(|e| e.i18n_key()),
            Some("error-invalid-selection")
        );
        assert!(!app.controller.can_submit());
    }

    #[test]
    fn slow_read_of_earlier_pick_is_dropped() {
        let (_dir, mut app) = new_app();
        // The first pick is still being read when the second arrives.
        let _ = app.update(Message::FileChosen(Some(PathBuf::from("/tmp/big.png"))));
        let stale = app.controller.pending_read().expect("read in flight");
        let _ = app.update(Message::FileChosen(Some(PathBuf::from("/nowhere/notes.txt"))));

        let _ = app.update(Message::FileRead {
            read: stale,
            result: Ok(SelectedFile::new("big.png", "image/png", vec![1])),
        });
        assert!(app.controller.selected().is_none());
        assert_eq!(
            app.controller.error().map(|e| e.i18n_key()),
            Some("error-invalid-selection")
        );
        assert!(!app.controller.can_submit());
    }

    #[test]
    fn only_latest_of_two_image_picks_is_selected() {
        let (_dir, mut app) = new_app();
        let _ = app.update(Message::FileChosen(Some(PathBuf::from("/tmp/first.png"))));
        let first = app.controller.pending_read().expect("read in flight");
        let _ = app.update(Message::FileChosen(Some(PathBuf::from("/tmp/second.jpg"))));
        let second = app.controller.pending_read().expect("read in flight");

        let _ = app.update(Message::FileRead {
            read: second,
            result: Ok(SelectedFile::new("second.jpg", "image/jpeg", vec![2])),
        });
        let _ = app.update(Message::FileRead {
            read: first,
            result: Ok(SelectedFile::new("first.png", "image/png", vec![1])),
        });
        assert_eq!(
            app.controller.selected().map(SelectedFile::name),
            Some("second.jpg")
        );
    }

    #[test]
    fn submit_is_held_while_a_pick_is_being_read() {
        let (_dir, mut app) = new_app();
        read_file(&mut app, png());
        let _ = app.update(Message::FileChosen(Some(PathBuf::from("/tmp/next.png"))));

        let _ = app.update(Message::Submit);
        assert!(!app.controller.is_loading());

        let read = app.controller.pending_read().expect("read in flight");
        let _ = app.update(Message::FileRead {
            read,
            result: Ok(SelectedFile::new("next.png", "image/png", vec![3])),
        });
        assert_eq!(app.controller.selected().map(SelectedFile::name), Some("next.png"));
        assert!(app.controller.can_submit());
    }

    #[test]
    fn submit_without_file_shows_error() {
        let (_dir, mut app) = new_app();
        let _ = app.update(Message::Submit);
        assert!(!app.controller.is_loading());
        assert_eq!(
            app.controller.error().map(|e| e.i18n_key()),
            Some("error-no-file")
        );
    }

    #[test]
    fn tick_spins_only_while_loading() {
        let (_dir, mut app) = new_app();
        let _ = app.update(Message::Tick(std::time::Instant::now()));
        assert_eq!(app.spinner_rotation, 0.0);

        start_submission(&mut app);
        let _ = app.update(Message::Tick(std::time::Instant::now()));
        assert!(app.spinner_rotation > 0.0);
    }

    #[test]
    fn finished_submission_shows_result() {
        let (_dir, mut app) = new_app();
        let attempt = start_submission(&mut app);

        let _ = app.update(Message::SubmissionFinished {
            attempt,
            result: Ok(vec![1, 2, 3]),
        });
        assert!(!app.controller.is_loading());
        assert_eq!(
            app.controller.result().map(|r| r.bytes().to_vec()),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn timed_out_submission_shows_generic_error() {
        let (_dir, mut app) = new_app();
        let attempt = start_submission(&mut app);

        let _ = app.update(Message::SubmissionFinished {
            attempt,
            result: Err(SubmissionError::Timeout(30_000)),
        });
        assert!(!app.controller.is_loading());
        assert!(app.controller.result().is_none());
        assert_eq!(
            app.controller.error().map(|e| e.i18n_key()),
            Some("error-submission")
        );

        let _ = app.update(Message::DismissError);
        assert!(app.controller.error().is_none());
    }

    #[test]
    fn drop_while_loading_changes_nothing() {
        let (_dir, mut app) = new_app();
        start_submission(&mut app);

        let _ = app.update(Message::FileDropped(PathBuf::from("/tmp/other.txt")));
        assert!(app.controller.is_loading());
        assert!(app.controller.error().is_none());
        assert_eq!(app.controller.selected().map(SelectedFile::name), Some("kid.png"));
    }

    #[test]
    fn health_result_is_stored() {
        let (_dir, mut app) = new_app();
        let _ = app.update(Message::HealthChecked(ServiceStatus::Online));
        assert_eq!(app.service_status, ServiceStatus::Online);
    }

    #[test]
    fn config_warning_can_be_dismissed() {
        let (_dir, mut app) = new_app();
        app.config_warning = Some(CONFIG_LOAD_WARNING_KEY.to_string());
        let _ = app.update(Message::DismissConfigWarning);
        assert!(app.config_warning.is_none());
    }

    #[test]
    fn language_selection_switches_and_persists() {
        let (dir, mut app) = new_app();
        let _ = app.update(Message::LanguageSelected("es".into()));

        assert_eq!(app.i18n.current_locale().to_string(), "es");
        let saved = fs::read_to_string(dir.path().join("settings.toml")).expect("saved");
        assert!(saved.contains("language = \"es\""));
    }
}
