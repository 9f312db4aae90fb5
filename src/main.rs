//! Artist Search: debounced artist autocomplete
//!
//! Usage:
//!   artist-search                  - Open the search window
//!   artist-search query <keyword>  - Print suggestions for one keyword
//!   artist-search help             - Show help

mod app;
mod backend;
mod commands;
mod config;
mod error;
mod search;
mod ui;

use app::ArtistSearch;
use backend::api::CatalogClient;
use commands::Command;
use config::Config;
use search::cache::is_searchable;
use search::MIN_KEYWORD_LEN;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::dropdown::{spelling_labels, DID_YOU_MEAN, EMPTY_MESSAGE};

fn main() -> iced::Result {
    // Use try_init so a second init attempt is harmless
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().skip(1).collect();

    match Command::parse(&args[..]) {
        Command::Gui => start_gui(),
        Command::Query { keyword } => {
            if !run_query(&keyword) {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Help => {
            println!("{}", Command::help_text());
            Ok(())
        }
        Command::Invalid { message } => {
            eprintln!("{}", message);
            eprintln!("Run 'artist-search help' for usage");
            std::process::exit(2);
        }
    }
}

fn start_gui() -> iced::Result {
    let config = Config::load();

    tracing::info!("Starting Artist Search against {}", config.attractions_url());

    iced::application(app::TITLE, ArtistSearch::update, ArtistSearch::view)
        .subscription(ArtistSearch::subscription)
        .theme(ArtistSearch::theme)
        .window(app::window_settings())
        .antialiasing(true)
        .run_with(move || ArtistSearch::new(&config))
}

/// One lookup without the UI; returns false on failure
fn run_query(keyword: &str) -> bool {
    if !is_searchable(keyword) {
        eprintln!("Keyword must have at least {} characters", MIN_KEYWORD_LEN);
        return false;
    }

    let config = Config::load();
    let client = CatalogClient::new(&config);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return false;
        }
    };

    match rt.block_on(client.fetch_suggestions(keyword)) {
        Ok(result) if !result.attractions.is_empty() => {
            for attraction in &result.attractions {
                match &attraction.url {
                    Some(url) => println!("{}  ({}, id {})  {}", attraction.name, attraction.kind, attraction.id, url),
                    None => println!("{}  ({}, id {})", attraction.name, attraction.kind, attraction.id),
                }
            }
            true
        }
        Ok(result) if !result.suggestions.is_empty() => {
            println!("{} {}", DID_YOU_MEAN, spelling_labels(&result.suggestions).concat());
            for suggestion in &result.suggestions {
                tracing::debug!("{:?} scored {:.2}", suggestion.suggestion, suggestion.score);
            }
            true
        }
        Ok(_) => {
            println!("{}", EMPTY_MESSAGE);
            true
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}
