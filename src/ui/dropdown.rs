//! Suggestions dropdown
//!
//! `Dropdown::resolve` turns the typed keyword and the query status into
//! exactly one render state; `view` draws it. Precedence: short keyword,
//! loading, error, empty, "did you mean", attraction list.

use std::collections::HashMap;

use iced::widget::{button, column, container, image, row, text, Space};
use iced::{Alignment, Background, Border, Color, Element, Length, Padding};

use super::theme::DarkTheme;
use crate::backend::types::{Attraction, SpellcheckSuggestion};
use crate::search::cache::{is_searchable, QueryStatus};

pub const REGION_LABEL: &str = "Sugestões de busca";
pub const LISTBOX_LABEL: &str = "Artistas encontrados";
pub const LOADING_MESSAGE: &str = "Carregando sugestões…";
pub const ERROR_MESSAGE: &str = "Não foi possível carregar sugestões no momento.";
pub const EMPTY_MESSAGE: &str = "Nenhuma banda encontrada.";
pub const DID_YOU_MEAN: &str = "Você quis dizer:";

const THUMBNAIL_SIZE: f32 = 32.0;

/// Accessibility role of the rendered region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Polite live region
    Status,
    /// Assertive live region
    Alert,
    /// Selectable options
    Listbox,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dropdown<'a> {
    Hidden,
    Loading,
    Failed,
    Empty,
    DidYouMean(&'a [SpellcheckSuggestion]),
    Attractions(&'a [Attraction]),
}

impl<'a> Dropdown<'a> {
    /// `keyword` is the text as typed; `status` belongs to the debounced
    /// keyword. A searchable keyword with nothing fetched yet is about to be,
    /// so it shows as loading.
    pub fn resolve(keyword: &str, status: QueryStatus<'a>) -> Self {
        if !is_searchable(keyword) {
            return Dropdown::Hidden;
        }

        match status {
            QueryStatus::Idle | QueryStatus::Loading => Dropdown::Loading,
            QueryStatus::Failed(_) => Dropdown::Failed,
            QueryStatus::Ready(result) if !result.attractions.is_empty() => {
                Dropdown::Attractions(&result.attractions)
            }
            QueryStatus::Ready(result) if !result.suggestions.is_empty() => {
                Dropdown::DidYouMean(&result.suggestions)
            }
            QueryStatus::Ready(_) => Dropdown::Empty,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Dropdown::Loading => Some(Role::Status),
            Dropdown::Failed => Some(Role::Alert),
            Dropdown::Attractions(_) => Some(Role::Listbox),
            Dropdown::Hidden | Dropdown::Empty | Dropdown::DidYouMean(_) => None,
        }
    }

    /// Plain message for the message-only states
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Dropdown::Loading => Some(LOADING_MESSAGE),
            Dropdown::Failed => Some(ERROR_MESSAGE),
            Dropdown::Empty => Some(EMPTY_MESSAGE),
            _ => None,
        }
    }

    /// Options that can be highlighted with the keyboard
    pub fn option_count(&self) -> usize {
        match self {
            Dropdown::Attractions(list) => list.len(),
            _ => 0,
        }
    }
}

/// Button labels for the "did you mean" row, comma separated
pub fn spelling_labels(suggestions: &[SpellcheckSuggestion]) -> Vec<String> {
    let last = suggestions.len().saturating_sub(1);
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if i < last {
                format!("{}, ", s.suggestion)
            } else {
                s.suggestion.clone()
            }
        })
        .collect()
}

/// Message each option sends when pressed, in display order
fn press_messages<Message>(
    dropdown: Dropdown<'_>,
    on_attraction: impl Fn(Attraction) -> Message,
    on_suggestion: impl Fn(String) -> Message,
) -> Vec<Message> {
    match dropdown {
        Dropdown::Attractions(attractions) => attractions
            .iter()
            .map(|attraction| on_attraction(attraction.clone()))
            .collect(),
        Dropdown::DidYouMean(suggestions) => suggestions
            .iter()
            .map(|suggestion| on_suggestion(suggestion.suggestion.clone()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Render the dropdown; `None` when there is nothing to show
pub fn view<'a, Message: Clone + 'a>(
    dropdown: Dropdown<'a>,
    thumbnails: &'a HashMap<String, image::Handle>,
    highlighted: Option<usize>,
    on_attraction: impl Fn(Attraction) -> Message + 'a,
    on_suggestion: impl Fn(String) -> Message + 'a,
) -> Option<Element<'a, Message>> {
    let messages = press_messages(dropdown, on_attraction, on_suggestion);

    let body: Element<'a, Message> = match dropdown {
        Dropdown::Hidden => return None,
        Dropdown::Loading | Dropdown::Failed | Dropdown::Empty => {
            let color = match dropdown.role() {
                Some(Role::Alert) => DarkTheme::ERROR,
                Some(Role::Status) => DarkTheme::TEXT_MUTED,
                _ => DarkTheme::TEXT,
            };
            text(dropdown.message().unwrap_or_default())
                .size(14)
                .color(color)
                .into()
        }
        Dropdown::DidYouMean(suggestions) => {
            let mut items: Vec<Element<'a, Message>> =
                vec![text(DID_YOU_MEAN).size(14).color(DarkTheme::TEXT).into()];
            for (label, message) in spelling_labels(suggestions).into_iter().zip(messages) {
                items.push(
                    button(text(label).size(14).color(DarkTheme::PRIMARY))
                        .on_press(message)
                        .padding(0)
                        .style(button::text)
                        .into(),
                );
            }
            row(items).spacing(6).align_y(Alignment::Center).into()
        }
        Dropdown::Attractions(attractions) => {
            let options: Vec<Element<'a, Message>> = attractions
                .iter()
                .zip(messages)
                .enumerate()
                .map(|(i, (attraction, message))| {
                    option_row(attraction, thumbnails, highlighted == Some(i), message)
                })
                .collect();

            column![
                text(LISTBOX_LABEL).size(12).color(DarkTheme::TEXT_MUTED),
                column(options).spacing(4),
            ]
            .spacing(8)
            .into()
        }
    };

    Some(
        container(
            column![text(REGION_LABEL).size(11).color(DarkTheme::TEXT_MUTED), body].spacing(8),
        )
        .padding(12)
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(DarkTheme::SURFACE)),
            border: Border {
                color: DarkTheme::BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        })
        .into(),
    )
}

fn option_row<'a, Message: Clone + 'a>(
    attraction: &'a Attraction,
    thumbnails: &'a HashMap<String, image::Handle>,
    is_highlighted: bool,
    on_press: Message,
) -> Element<'a, Message> {
    // Decorative only, so a missing download just leaves the slot empty
    let thumbnail: Element<'a, Message> = match attraction
        .thumbnail()
        .and_then(|img| thumbnails.get(&img.url).map(|handle| (img, handle)))
    {
        Some((img, handle)) => image(handle.clone())
            .width(THUMBNAIL_SIZE * img.aspect_ratio().clamp(1.0, 2.0))
            .height(THUMBNAIL_SIZE)
            .into(),
        None => Space::new(THUMBNAIL_SIZE, THUMBNAIL_SIZE).into(),
    };

    let content = row![
        thumbnail,
        text(&attraction.name).size(15).color(DarkTheme::TEXT),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    button(content)
        .on_press(on_press)
        .width(Length::Fill)
        .padding(Padding::from([8.0, 12.0]))
        .style(move |_theme, status| {
            let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
            button::Style {
                background: Some(Background::Color(if is_highlighted || hovered {
                    DarkTheme::SELECTION
                } else {
                    Color::TRANSPARENT
                })),
                text_color: DarkTheme::TEXT,
                border: Border::default().rounded(8),
                ..Default::default()
            }
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::types::QueryResult;
    use crate::error::FetchError;

    fn band(id: &str, name: &str) -> Attraction {
        Attraction {
            id: id.to_string(),
            name: name.to_string(),
            kind: "attraction".to_string(),
            url: None,
            images: None,
        }
    }

    fn spelling(s: &str, score: f64) -> SpellcheckSuggestion {
        SpellcheckSuggestion {
            suggestion: s.to_string(),
            score,
        }
    }

    #[test]
    fn test_short_or_blank_keyword_renders_nothing() {
        let result = QueryResult {
            attractions: vec![band("1", "Metallica")],
            suggestions: Vec::new(),
        };
        for keyword in ["", "   ", "me", "  me  "] {
            let dropdown = Dropdown::resolve(keyword, QueryStatus::Ready(&result));
            assert_eq!(dropdown, Dropdown::Hidden);
            assert_eq!(dropdown.role(), None);
        }
    }

    #[test]
    fn test_loading_is_polite_status() {
        let dropdown = Dropdown::resolve("metal", QueryStatus::Loading);
        assert_eq!(dropdown, Dropdown::Loading);
        assert_eq!(dropdown.role(), Some(Role::Status));
        assert_eq!(dropdown.message(), Some(LOADING_MESSAGE));
    }

    #[test]
    fn test_pending_debounce_shows_loading() {
        assert_eq!(Dropdown::resolve("metal", QueryStatus::Idle), Dropdown::Loading);
    }

    #[test]
    fn test_error_is_assertive_alert() {
        let err = FetchError::Status(500);
        let dropdown = Dropdown::resolve("metal", QueryStatus::Failed(&err));
        assert_eq!(dropdown, Dropdown::Failed);
        assert_eq!(dropdown.role(), Some(Role::Alert));
        assert_eq!(dropdown.message(), Some(ERROR_MESSAGE));
        assert_eq!(dropdown.option_count(), 0);
    }

    #[test]
    fn test_empty_result() {
        let result = QueryResult::default();
        let dropdown = Dropdown::resolve("metal", QueryStatus::Ready(&result));
        assert_eq!(dropdown, Dropdown::Empty);
        assert_eq!(dropdown.message(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn test_spelling_shown_only_without_attractions() {
        let result = QueryResult {
            attractions: Vec::new(),
            suggestions: vec![spelling("metallica", 0.9)],
        };
        match Dropdown::resolve("xyz", QueryStatus::Ready(&result)) {
            Dropdown::DidYouMean(list) => assert_eq!(list[0].suggestion, "metallica"),
            other => panic!("Expected did-you-mean, got {:?}", other),
        }

        let result = QueryResult {
            attractions: vec![band("1", "Metallica")],
            suggestions: vec![spelling("metallica", 0.9)],
        };
        let dropdown = Dropdown::resolve("metal", QueryStatus::Ready(&result));
        assert!(matches!(dropdown, Dropdown::Attractions(list) if list.len() == 1));
        assert_eq!(dropdown.role(), Some(Role::Listbox));
        assert_eq!(dropdown.option_count(), 1);
    }

    #[test]
    fn test_attraction_order_is_preserved() {
        let result = QueryResult {
            attractions: vec![band("2", "Megadeth"), band("1", "Metallica"), band("3", "Anthrax")],
            suggestions: Vec::new(),
        };
        match Dropdown::resolve("met", QueryStatus::Ready(&result)) {
            Dropdown::Attractions(list) => {
                let names: Vec<&str> = list.iter().map(|a| a.name.as_str()).collect();
                assert_eq!(names, ["Megadeth", "Metallica", "Anthrax"]);
            }
            other => panic!("Expected attractions, got {:?}", other),
        }
    }

    #[test]
    fn test_spelling_labels_are_comma_separated() {
        let labels = spelling_labels(&[spelling("metallica", 0.9), spelling("metalica", 0.5)]);
        assert_eq!(labels, ["metallica, ", "metalica"]);

        assert_eq!(spelling_labels(&[spelling("metallica", 0.9)]), ["metallica"]);
        assert!(spelling_labels(&[]).is_empty());
    }

    #[test]
    fn test_hidden_view_renders_nothing() {
        let thumbnails = HashMap::new();
        let element = view(Dropdown::Hidden, &thumbnails, None, |a: Attraction| a.name, |s: String| s);
        assert!(element.is_none());
    }

    #[test]
    fn test_attraction_options_send_their_entity() {
        let mut metallica = band("1", "Metallica");
        metallica.url = Some("https://example.com/metallica".to_string());
        let list = vec![metallica, band("2", "Megadeth")];

        let messages = press_messages(
            Dropdown::Attractions(&list),
            |a: Attraction| a,
            |s: String| band("", &s),
        );
        assert_eq!(messages, list);
    }

    #[test]
    fn test_spelling_options_send_their_keyword() {
        let suggestions = vec![spelling("metallica", 0.9), spelling("metalica", 0.5)];

        let messages = press_messages(
            Dropdown::DidYouMean(&suggestions),
            |a: Attraction| a.name,
            |s: String| s,
        );
        assert_eq!(messages, ["metallica", "metalica"]);
    }

    #[test]
    fn test_message_states_have_no_options() {
        for dropdown in [Dropdown::Hidden, Dropdown::Loading, Dropdown::Failed, Dropdown::Empty] {
            let messages = press_messages(dropdown, |a: Attraction| a.name, |s: String| s);
            assert!(messages.is_empty());
        }
    }
}
