//! Best-effort related-games lookup.
//!
//! Suggestions are decoration on a game page, so every failure is folded into
//! [`RelatedGames::Failed`] for the caller to show or ignore.

use std::future::Future;

use crate::client::GenkitSuggestClient;
use crate::error::SuggestError;
use crate::types::{MAX_SUGGESTIONS, Suggestion};

/// Anything that can propose games related to a title.
pub trait SuggestionService {
    fn suggest(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, SuggestError>> + Send;
}

impl SuggestionService for GenkitSuggestClient {
    fn suggest(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, SuggestError>> + Send {
        self.related_games(title)
    }
}

/// Outcome of a related-games lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelatedGames {
    Loaded(Vec<Suggestion>),
    /// The service answered, but had nothing to suggest.
    Empty,
    Failed(String),
}

impl RelatedGames {
    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Self::Loaded(games) => games,
            _ => &[],
        }
    }
}

/// Look up games related to `title`, never failing.
pub async fn fetch_related<S: SuggestionService>(service: &S, title: &str) -> RelatedGames {
    let title = title.trim();
    if title.is_empty() {
        return RelatedGames::Empty;
    }

    match service.suggest(title).await {
        Ok(mut games) => {
            games.truncate(MAX_SUGGESTIONS);
            if games.is_empty() {
                RelatedGames::Empty
            } else {
                RelatedGames::Loaded(games)
            }
        }
        Err(e) => {
            log::warn!("Related games for '{}' unavailable: {}", title, e);
            RelatedGames::Failed(e.to_string())
        }
    }
}
