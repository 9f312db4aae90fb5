//! Command-line parsing
//!
//! `artist-search` opens the window; `artist-search query <keyword>` runs a
//! single lookup and prints it.

/// Parsed command from process arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the search window (no arguments)
    Gui,
    /// One-shot lookup: query <keyword...>
    Query { keyword: String },
    /// Show help: help, --help, -h
    Help,
    /// Anything else, or a malformed command
    Invalid { message: String },
}

impl Command {
    /// Parse arguments, excluding the program name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let Some(cmd) = args.first() else {
            return Command::Gui;
        };

        match cmd.as_ref().to_lowercase().as_str() {
            "query" | "q" => {
                let keyword = args[1..]
                    .iter()
                    .map(|a| a.as_ref())
                    .collect::<Vec<_>>()
                    .join(" ");
                let keyword = keyword.trim();
                if keyword.is_empty() {
                    Command::Invalid {
                        message: "Usage: artist-search query <keyword>".to_string(),
                    }
                } else {
                    Command::Query {
                        keyword: keyword.to_string(),
                    }
                }
            }
            "help" | "--help" | "-h" => Command::Help,
            other => Command::Invalid {
                message: format!("Unknown command: {}", other),
            },
        }
    }

    /// Usage text for the help command
    pub fn help_text() -> &'static str {
        "artist-search - artist autocomplete for the Ticketmaster catalog

Usage: artist-search [command]

Commands:
  (none)            Open the search window
  query <keyword>   Look up a keyword once and print the suggestions
  help              Show this help message

Environment:
  TICKETMASTER_API_URL  Catalog base URL, e.g. https://app.ticketmaster.com/discovery/v2/
  TICKETMASTER_API_KEY  Catalog API key
  RUST_LOG              Log filter, e.g. artist_search=debug"
    }
}
