pub mod client;
pub mod config;
pub mod error;
pub mod related;
pub mod types;

pub use client::{GenkitSuggestClient, parse_flow_response};
pub use config::{
    ConfigSource, ConfigSources, DEFAULT_ENDPOINT, SuggestConfig, config_sources,
    save_to_settings,
};
pub use error::SuggestError;
pub use related::{RelatedGames, SuggestionService, fetch_related};
pub use types::{MAX_SUGGESTIONS, Suggestion};
