//! Labeled search textbox

use iced::widget::{column, container, text, text_input};
use iced::{Background, Border, Color, Element, Length, Padding};

use super::theme::DarkTheme;

pub const LABEL: &str = "Buscar artistas";
pub const PLACEHOLDER: &str = "Buscar artistas, bandas...";

/// Widget id, used to keep focus on the textbox
pub fn input_id() -> text_input::Id {
    text_input::Id::new("artist-search-input")
}

/// Search bar component
pub fn view<'a, Message: Clone + 'a>(
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    let input = text_input(PLACEHOLDER, value)
        .id(input_id())
        .on_input(on_input)
        .on_submit(on_submit)
        .padding(Padding::new(14.0))
        .size(18)
        .style(|_theme, _status| text_input::Style {
            background: Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            icon: DarkTheme::TEXT_MUTED,
            placeholder: DarkTheme::TEXT_PLACEHOLDER,
            value: DarkTheme::TEXT,
            selection: DarkTheme::PRIMARY,
        });

    column![
        text(LABEL).size(12).color(DarkTheme::TEXT_MUTED),
        container(input)
            .width(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(DarkTheme::SURFACE)),
                border: Border {
                    color: DarkTheme::BORDER,
                    width: 1.0,
                    radius: 12.0.into(),
                },
                ..Default::default()
            }),
    ]
    .spacing(6)
    .width(Length::Fill)
    .into()
}
