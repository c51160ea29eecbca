// SPDX-License-Identifier: MPL-2.0
//! Canvas spinner shown while a submission is in flight.

use crate::ui::design_tokens::{opacity, sizing};
use iced::widget::canvas::{self, path::Arc, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Element, Length, Radians, Rectangle, Renderer, Theme};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Rotation in radians added on every tick.
pub const SPINNER_SPEED: f32 = 0.15;

/// Next rotation angle, kept within `[0, TAU)`.
#[must_use]
pub fn advance(rotation: f32) -> f32 {
    (rotation + SPINNER_SPEED).rem_euclid(TAU)
}

/// A half-circle arc turning over a faint full-circle track.
pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
        }
    }

    pub fn into_element<Message: 'static>(self) -> Element<'static, Message> {
        Canvas::new(self)
            .width(Length::Fixed(sizing::SPINNER))
            .height(Length::Fixed(sizing::SPINNER))
            .into()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame: &mut Frame| {
            let center = frame.center();
            let radius = frame.width().min(frame.height()) / 2.0 - sizing::SPINNER_STROKE;

            frame.stroke(
                &Path::circle(center, radius),
                Stroke::default()
                    .with_width(sizing::SPINNER_STROKE)
                    .with_color(Color {
                        a: opacity::TRACK,
                        ..self.color
                    }),
            );

            // Start at twelve o'clock.
            let start = self.rotation - FRAC_PI_2;
            let arc = Path::new(|builder| {
                builder.arc(Arc {
                    center,
                    radius,
                    start_angle: Radians(start),
                    end_angle: Radians(start + PI),
                });
            });
            frame.stroke(
                &arc,
                Stroke::default()
                    .with_width(sizing::SPINNER_STROKE)
                    .with_color(self.color)
                    .with_line_cap(canvas::LineCap::Round),
            );
        });

        vec![geometry]
    }
}
