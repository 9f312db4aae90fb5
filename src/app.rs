//! Core application state and Iced Application implementation
//!
//! Wires the pieces together: keystrokes go to the store and the debouncer,
//! a settled keyword goes to the cache, the cache decides whether to fetch,
//! and fetched data flows back into the cache and (for the active keyword)
//! into the store. The dropdown is derived from that state on every view.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use iced::keyboard::Key;
use iced::task::Handle;
use iced::widget::{button, column, container, image, row, text, text_input};
use iced::{keyboard, window, Alignment, Background, Border, Element, Event, Length, Padding};
use iced::{Size, Subscription, Task, Theme};

use crate::backend::api::CatalogClient;
use crate::backend::types::{Attraction, QueryResult};
use crate::config::Config;
use crate::error::FetchError;
use crate::search::cache::{is_searchable, Lookup, QueryStatus, SuggestionCache};
use crate::search::debounce::{Debouncer, Ticket};
use crate::search::store::{SearchOutcome, SearchStore};
use crate::search::DEBOUNCE_DELAY;
use crate::ui::dropdown::{self, Dropdown};
use crate::ui::search_bar;
use crate::ui::theme::DarkTheme;

pub const TITLE: &str = "Artist Search";

/// How often expired cache entries are dropped
const EVICT_INTERVAL: Duration = Duration::from_secs(60);

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(640.0, 520.0),
        position: window::Position::Centered,
        resizable: true,
        ..Default::default()
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct ArtistSearch {
    store: SearchStore,
    debouncer: Debouncer<String>,
    cache: SuggestionCache,
    client: CatalogClient,
    /// Debounced keyword the dropdown data belongs to
    active_keyword: String,
    /// Keyword whose attractions the store currently holds
    synced_keyword: String,
    highlighted: Option<usize>,
    outcome: Option<SearchOutcome>,
    thumbnails: HashMap<String, image::Handle>,
    thumbnails_requested: HashSet<String>,
    // Abort-on-drop: replacing or dropping a handle cancels its task
    debounce_timer: Option<Handle>,
    in_flight: HashMap<String, Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    DebounceElapsed(Ticket),
    SuggestionsFetched {
        keyword: String,
        result: Result<QueryResult, FetchError>,
    },
    AttractionSelected(Attraction),
    SpellingSelected(String),
    Submit,
    HighlightNext,
    HighlightPrevious,
    Escape,
    ThumbnailLoaded {
        url: String,
        result: Result<image::Handle, FetchError>,
    },
    EvictTick,
    IcedEvent(Event),
}

impl ArtistSearch {
    pub fn new(config: &Config) -> (Self, Task<Message>) {
        let app = Self {
            store: SearchStore::new(),
            debouncer: Debouncer::new(DEBOUNCE_DELAY),
            cache: SuggestionCache::default(),
            client: CatalogClient::new(config),
            active_keyword: String::new(),
            synced_keyword: String::new(),
            highlighted: None,
            outcome: None,
            thumbnails: HashMap::new(),
            thumbnails_requested: HashSet::new(),
            debounce_timer: None,
            in_flight: HashMap::new(),
        };
        (app, text_input::focus(search_bar::input_id()))
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => {
                self.store.set_text(value.clone());
                self.highlighted = None;
                self.schedule_debounce(value)
            }

            Message::DebounceElapsed(ticket) => match self.debouncer.settle(ticket) {
                Some(keyword) => {
                    self.debounce_timer = None;
                    tracing::debug!("Debounce settled on {:?}", keyword);
                    self.activate(keyword)
                }
                None => Task::none(),
            },

            Message::SuggestionsFetched { keyword, result } => {
                self.in_flight.remove(&keyword);
                if let Err(e) = &result {
                    tracing::warn!(status = ?e.status(), "Fetching suggestions for {:?} failed: {}", keyword, e);
                }
                let succeeded = result.is_ok();
                self.cache.complete(&keyword, result, Instant::now());

                if keyword != self.active_keyword {
                    tracing::debug!("Ignoring response for superseded keyword {:?}", keyword);
                    return Task::none();
                }
                match self.cache.data(&keyword) {
                    Some(data) if succeeded => self.sync_result(&data),
                    _ => Task::none(),
                }
            }

            Message::AttractionSelected(attraction) => {
                self.outcome = Some(self.store.search(Some(&attraction)));
                self.store.replace_text(attraction.name.clone());
                self.highlighted = None;
                self.schedule_debounce(attraction.name)
            }

            Message::SpellingSelected(suggestion) => {
                self.store.replace_text(suggestion.clone());
                self.highlighted = None;
                self.schedule_debounce(suggestion)
            }

            Message::Submit => {
                let highlighted = match (self.highlighted, self.dropdown()) {
                    (Some(i), Dropdown::Attractions(list)) => list.get(i).cloned(),
                    _ => None,
                };
                if let Some(attraction) = highlighted {
                    return self.update(Message::AttractionSelected(attraction));
                }
                self.outcome = Some(self.store.search(None));
                self.highlighted = None;
                Task::none()
            }

            Message::HighlightNext => {
                let count = self.dropdown().option_count();
                if count > 0 {
                    self.highlighted = Some(match self.highlighted {
                        Some(i) => (i + 1) % count,
                        None => 0,
                    });
                }
                Task::none()
            }

            Message::HighlightPrevious => {
                let count = self.dropdown().option_count();
                if count > 0 {
                    self.highlighted = Some(match self.highlighted {
                        Some(0) | None => count - 1,
                        Some(i) => (i - 1).min(count - 1),
                    });
                }
                Task::none()
            }

            Message::Escape => {
                self.store.set_show_suggestions(false);
                self.highlighted = None;
                Task::none()
            }

            Message::ThumbnailLoaded { url, result } => {
                match result {
                    Ok(handle) => {
                        self.thumbnails.insert(url, handle);
                    }
                    Err(e) => tracing::debug!("Thumbnail {} unavailable: {}", url, e),
                }
                Task::none()
            }

            Message::EvictTick => {
                let evicted = self.cache.evict_expired(Instant::now());
                if evicted > 0 {
                    tracing::debug!("{} cached keywords left", self.cache.len());
                }
                Task::none()
            }

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event {
                    match key {
                        Key::Named(keyboard::key::Named::ArrowDown) => {
                            return self.update(Message::HighlightNext);
                        }
                        Key::Named(keyboard::key::Named::ArrowUp) => {
                            return self.update(Message::HighlightPrevious);
                        }
                        Key::Named(keyboard::key::Named::Escape) => {
                            return self.update(Message::Escape);
                        }
                        _ => {}
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let search_row = row![
            search_bar::view(self.store.text(), Message::InputChanged, Message::Submit),
            button(text("Pesquisar").size(16))
                .on_press(Message::Submit)
                .padding(Padding::from([14.0, 20.0]))
                .style(button::primary),
        ]
        .spacing(12)
        .align_y(Alignment::End);

        let mut content = column![text(TITLE).size(24).color(DarkTheme::TEXT), search_row].spacing(16);

        if let Some(dropdown) = dropdown::view(
            self.dropdown(),
            &self.thumbnails,
            self.highlighted,
            Message::AttractionSelected,
            Message::SpellingSelected,
        ) {
            content = content.push(dropdown);
        }

        if let Some(line) = self.confirmation() {
            content = content.push(text(line).size(14).color(DarkTheme::TEXT_MUTED));
        }

        container(container(content).padding(24).width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(DarkTheme::BACKGROUND)),
                border: Border {
                    color: DarkTheme::BORDER,
                    width: 1.0,
                    radius: 16.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            iced::event::listen().map(Message::IcedEvent),
            iced::time::every(EVICT_INTERVAL).map(|_| Message::EvictTick),
        ])
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ========================================================================
    // Search flow
    // ========================================================================

    /// Current render state of the dropdown
    pub fn dropdown(&self) -> Dropdown<'_> {
        if !self.store.show_suggestions() {
            return Dropdown::Hidden;
        }
        let status = self.cache.status(&self.active_keyword);

        // Evicted while on screen; nothing is fetched until the next keystroke
        if status == QueryStatus::Idle
            && self.debounce_timer.is_none()
            && is_searchable(&self.active_keyword)
            && is_searchable(self.store.text())
        {
            let attractions = self.store.attractions();
            return if self.synced_keyword == self.active_keyword && !attractions.is_empty() {
                Dropdown::Attractions(attractions)
            } else {
                Dropdown::Hidden
            };
        }
        Dropdown::resolve(self.store.text(), status)
    }

    fn confirmation(&self) -> Option<String> {
        match &self.outcome {
            Some(SearchOutcome::Found(band)) => Some(format!("Banda encontrada: {}", band.name)),
            Some(SearchOutcome::NotFound) => Some("Nenhuma banda correspondente.".to_string()),
            None => None,
        }
    }

    fn schedule_debounce(&mut self, value: String) -> Task<Message> {
        let ticket = self.debouncer.push(value);
        let (task, handle) =
            Task::perform(self.debouncer.timer(ticket), Message::DebounceElapsed).abortable();
        self.debounce_timer = Some(handle.abort_on_drop());
        task
    }

    /// Make `keyword` the one whose results are shown, cancelling fetches
    /// for anything else
    fn activate(&mut self, keyword: String) -> Task<Message> {
        let superseded: Vec<String> = self
            .in_flight
            .keys()
            .filter(|k| **k != keyword)
            .cloned()
            .collect();
        for stale in superseded {
            if let Some(handle) = self.in_flight.remove(&stale) {
                handle.abort();
                self.cache.cancel(&stale);
                tracing::debug!("Cancelled fetch for superseded keyword {:?}", stale);
            }
        }

        self.active_keyword = keyword;
        self.highlighted = None;
        self.query_active()
    }

    fn query_active(&mut self) -> Task<Message> {
        let keyword = self.active_keyword.clone();
        match self.cache.lookup(&keyword, Instant::now()) {
            Lookup::Disabled | Lookup::InFlight => Task::none(),
            Lookup::Fresh(data) => self.sync_result(&data),
            Lookup::Fetch => {
                tracing::info!("Fetching suggestions for {:?}", keyword);
                let client = self.client.clone();
                let request = keyword.clone();
                let (task, handle) = Task::perform(
                    async move {
                        let result = client.fetch_suggestions(&request).await;
                        (request, result)
                    },
                    |(keyword, result)| Message::SuggestionsFetched { keyword, result },
                )
                .abortable();
                self.in_flight.insert(keyword, handle.abort_on_drop());
                task
            }
        }
    }

    /// Push a result for the active keyword into the store and start
    /// downloading its thumbnails
    fn sync_result(&mut self, data: &QueryResult) -> Task<Message> {
        self.store.receive_attractions(data.attractions.clone());
        self.synced_keyword = self.active_keyword.clone();

        let urls: Vec<String> = data
            .attractions
            .iter()
            .filter_map(|a| a.thumbnail())
            .map(|img| img.url.clone())
            .filter(|url| self.thumbnails_requested.insert(url.clone()))
            .collect();

        Task::batch(urls.into_iter().map(|url| {
            let client = self.client.clone();
            Task::perform(
                async move {
                    let result = client.fetch_image(&url).await;
                    (url, result)
                },
                |(url, result)| Message::ThumbnailLoaded { url, result },
            )
        }))
    }
}
