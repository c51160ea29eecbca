// SPDX-License-Identifier: MPL-2.0
//! The upload screen: controls on top, original and processed panes below.

use crate::app::Message;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, opacity, radius, sizing, spacing, typography};
use crate::ui::theming::ColorScheme;
use crate::ui::widgets::AnimatedSpinner;
use crate::upload::client::ServiceStatus;
use crate::upload::controller::{Controller, Preview};
use iced::widget::{
    button, checkbox, container, image, pick_list, text, Column, Container, Row, Space,
};
use iced::{alignment, Border, Color, ContentFit, Element, Length, Theme};

/// Everything the upload screen reads.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub controller: &'a Controller,
    pub service_status: ServiceStatus,
    pub spinner_rotation: f32,
    /// Fluent key of a startup warning, if any.
    pub config_warning: Option<&'a str>,
    pub is_dark_theme: bool,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let colors = ColorScheme::for_dark(ctx.is_dark_theme);

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .push(header(&ctx, colors))
        .push(controls(&ctx));

    if let Some(key) = ctx.config_warning {
        content = content.push(banner(
            ctx.i18n.tr(key),
            colors.warning,
            ctx.i18n.tr("error-dismiss"),
            Message::DismissConfigWarning,
        ));
    }

    if let Some(error) = ctx.controller.error() {
        content = content.push(banner(
            ctx.i18n.tr(error.i18n_key()),
            colors.error,
            ctx.i18n.tr("error-dismiss"),
            Message::DismissError,
        ));
    }

    let panes = Row::new()
        .spacing(spacing::MD)
        .height(Length::Fill)
        .push(pane(
            ctx.i18n.tr("original-heading"),
            original_body(&ctx, colors),
            colors,
        ))
        .push(pane(
            ctx.i18n.tr("result-heading"),
            result_body(&ctx, colors),
            colors,
        ));

    content.push(panes).into()
}

fn header<'a>(ctx: &ViewContext<'a>, colors: ColorScheme) -> Element<'a, Message> {
    let titles = Column::new()
        .spacing(spacing::XXS)
        .push(text(ctx.i18n.tr("app-heading")).size(typography::TITLE_LG))
        .push(
            text(ctx.i18n.tr("app-subtitle"))
                .size(typography::BODY)
                .color(colors.text_secondary),
        );

    let status_color = match ctx.service_status {
        ServiceStatus::Online => colors.online,
        ServiceStatus::Offline => colors.error,
        ServiceStatus::Checking => colors.text_secondary,
    };
    let check_button = button(text(ctx.i18n.tr("service-check-button")).size(typography::CAPTION))
        .style(button::text)
        .on_press_maybe(
            (ctx.service_status != ServiceStatus::Checking).then_some(Message::CheckHealth),
        );
    let status = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            text(ctx.i18n.tr(ctx.service_status.i18n_key()))
                .size(typography::CAPTION)
                .color(status_color),
        )
        .push(check_button);

    let locales: Vec<String> = ctx
        .i18n
        .available_locales
        .iter()
        .map(ToString::to_string)
        .collect();
    let current = Some(ctx.i18n.current_locale().to_string());
    let language = pick_list(locales, current, Message::LanguageSelected)
        .text_size(typography::CAPTION)
        .padding(spacing::XXS);

    let side = Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Right)
        .push(language)
        .push(status);

    Row::new()
        .align_y(alignment::Vertical::Top)
        .push(titles)
        .push(Space::new().width(Length::Fill))
        .push(side)
        .into()
}

fn controls<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let controller = ctx.controller;

    let choose = button(text(ctx.i18n.tr("choose-image-button")))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(button::secondary)
        .on_press_maybe(controller.can_select().then_some(Message::ChooseFile));

    let file_label = match controller.selected() {
        Some(file) => ctx
            .i18n
            .tr_with_args("selected-file-label", &[("name", file.name())]),
        None => String::new(),
    };

    let flag = checkbox(controller.flag_enabled())
        .label(ctx.i18n.tr("debug-toggle"))
        .on_toggle_maybe(controller.can_select().then_some(Message::ToggleFlag));

    let submit = button(text(ctx.i18n.tr("submit-button")))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(button::primary)
        .on_press_maybe(controller.can_submit().then_some(Message::Submit));

    Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(choose)
        .push(text(file_label).size(typography::BODY))
        .push(Space::new().width(Length::Fill))
        .push(flag)
        .push(submit)
        .into()
}

fn banner<'a>(
    message: String,
    color: Color,
    dismiss_label: String,
    dismiss: Message,
) -> Element<'a, Message> {
    let row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(text(message).size(typography::BODY).color(color).width(Length::Fill))
        .push(
            button(text(dismiss_label).size(typography::CAPTION))
                .style(button::text)
                .on_press(dismiss),
        );

    container(row)
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(
                Color {
                    a: opacity::TINT,
                    ..color
                }
                .into(),
            ),
            border: Border {
                color,
                width: border::WIDTH_SM,
                radius: radius::SM.into(),
            },
            ..Default::default()
        })
        .into()
}

fn pane<'a>(
    heading: String,
    body: Element<'a, Message>,
    colors: ColorScheme,
) -> Element<'a, Message> {
    let framed = Container::new(body)
        .padding(spacing::SM)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(colors.pane_background.into()),
            border: Border {
                color: colors.pane_border,
                width: border::WIDTH_SM,
                radius: radius::MD.into(),
            },
            ..Default::default()
        });

    Column::new()
        .spacing(spacing::XS)
        .width(Length::FillPortion(1))
        .height(Length::Fill)
        .push(text(heading).size(typography::TITLE_SM))
        .push(framed)
        .into()
}

fn placeholder<'a>(label: String, colors: ColorScheme) -> Element<'a, Message> {
    text(label)
        .size(typography::BODY)
        .color(colors.text_secondary)
        .into()
}

fn original_body<'a>(ctx: &ViewContext<'a>, colors: ColorScheme) -> Element<'a, Message> {
    match ctx.controller.preview() {
        Preview::Empty => placeholder(ctx.i18n.tr("original-placeholder"), colors),
        Preview::Decoding => placeholder(ctx.i18n.tr("preview-decoding"), colors),
        Preview::Unavailable => placeholder(ctx.i18n.tr("preview-unavailable"), colors),
        Preview::Ready(preview) => image(preview.handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
    }
}

fn result_body<'a>(ctx: &ViewContext<'a>, colors: ColorScheme) -> Element<'a, Message> {
    if ctx.controller.is_loading() {
        return Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .push(AnimatedSpinner::new(colors.brand, ctx.spinner_rotation).into_element())
            .push(
                text(ctx.i18n.tr("loading-text"))
                    .size(typography::BODY)
                    .color(colors.text_secondary),
            )
            .into();
    }

    match ctx.controller.result() {
        Some(result) => image(result.handle().clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => placeholder(ctx.i18n.tr("result-placeholder"), colors),
    }
}
