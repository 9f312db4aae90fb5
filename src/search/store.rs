//! Search session state
//!
//! Owned by the application and passed by reference; there is no shared or
//! global store. Created with the window and dropped with it.

use crate::backend::types::Attraction;

/// Result of the `search` action, shown as a confirmation line
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Attraction),
    NotFound,
}

#[derive(Debug, Default)]
pub struct SearchStore {
    text: String,
    show_suggestions: bool,
    attractions: Vec<Attraction>,
}

impl SearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn show_suggestions(&self) -> bool {
        self.show_suggestions
    }

    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    /// User typed: store the text and bring the dropdown back
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.show_suggestions = true;
    }

    /// Programmatic text change (selection); visibility is left alone
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_show_suggestions(&mut self, visible: bool) {
        self.show_suggestions = visible;
    }

    /// One-way sync of freshly fetched attractions
    pub fn receive_attractions(&mut self, attractions: Vec<Attraction>) {
        self.attractions = attractions;
    }

    /// Hide the dropdown and work out which band the user meant.
    ///
    /// An attraction whose name equals the current text (ignoring case) wins
    /// over the explicitly selected one.
    pub fn search(&mut self, selected: Option<&Attraction>) -> SearchOutcome {
        tracing::info!("Searching for: {:?}", self.text);
        self.show_suggestions = false;

        let text = self.text.to_lowercase();
        let matched = self
            .attractions
            .iter()
            .find(|a| a.name.to_lowercase() == text)
            .or(selected);

        match matched {
            Some(band) => {
                tracing::info!("Band found: {}", band.name);
                SearchOutcome::Found(band.clone())
            }
            None => {
                tracing::info!("No matching band found.");
                SearchOutcome::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(id: &str, name: &str) -> Attraction {
        Attraction {
            id: id.to_string(),
            name: name.to_string(),
            kind: "attraction".to_string(),
            url: None,
            images: None,
        }
    }

    #[test]
    fn test_typing_shows_dropdown() {
        let mut store = SearchStore::new();
        assert!(!store.show_suggestions());

        store.set_text("met");
        assert_eq!(store.text(), "met");
        assert!(store.show_suggestions());
    }

    #[test]
    fn test_replace_text_keeps_visibility() {
        let mut store = SearchStore::new();
        store.set_show_suggestions(false);
        store.replace_text("Metallica");
        assert_eq!(store.text(), "Metallica");
        assert!(!store.show_suggestions());
    }

    #[test]
    fn test_search_hides_dropdown() {
        let mut store = SearchStore::new();
        store.set_text("metal");
        store.search(None);
        assert!(!store.show_suggestions());
    }

    #[test]
    fn test_search_matches_text_case_insensitively() {
        let mut store = SearchStore::new();
        store.receive_attractions(vec![band("1", "Metallica"), band("2", "Megadeth")]);
        store.set_text("MEGADETH");

        let outcome = store.search(Some(&band("1", "Metallica")));
        assert_eq!(outcome, SearchOutcome::Found(band("2", "Megadeth")));
    }

    #[test]
    fn test_search_falls_back_to_selected() {
        let mut store = SearchStore::new();
        store.receive_attractions(vec![band("1", "Metallica")]);
        store.set_text("metal");

        let selected = band("1", "Metallica");
        assert_eq!(store.search(Some(&selected)), SearchOutcome::Found(selected.clone()));
        assert_eq!(store.search(None), SearchOutcome::NotFound);
    }

    #[test]
    fn test_receive_replaces_list() {
        let mut store = SearchStore::new();
        store.receive_attractions(vec![band("1", "Metallica")]);
        store.receive_attractions(vec![band("3", "Slayer")]);
        assert_eq!(store.attractions().len(), 1);
        assert_eq!(store.attractions()[0].name, "Slayer");
    }
}
