use std::sync::Mutex;

use cpc_vault_suggest::*;

struct FakeService {
    answer: fn() -> Result<Vec<Suggestion>, SuggestError>,
    asked: Mutex<Vec<String>>,
}

impl FakeService {
    fn new(answer: fn() -> Result<Vec<Suggestion>, SuggestError>) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }
}

impl SuggestionService for FakeService {
    async fn suggest(&self, title: &str) -> Result<Vec<Suggestion>, SuggestError> {
        self.asked.lock().unwrap().push(title.to_string());
        (self.answer)()
    }
}

fn suggestion(title: &str) -> Suggestion {
    Suggestion {
        title: title.to_string(),
        description: format!("Like it, but {title}."),
    }
}

#[tokio::test]
async fn loaded_when_service_answers() {
    let service = FakeService::new(|| Ok(vec![suggestion("Cauldron"), suggestion("Nebulus")]));
    let related = fetch_related(&service, "Sorcery+").await;

    assert_eq!(related.suggestions().len(), 2);
    assert!(matches!(related, RelatedGames::Loaded(_)));
    assert_eq!(*service.asked.lock().unwrap(), vec!["Sorcery+"]);
}

#[tokio::test]
async fn never_more_than_three() {
    let service = FakeService::new(|| {
        Ok(["A", "B", "C", "D", "E"]
            .into_iter()
            .map(suggestion)
            .collect())
    });
    let related = fetch_related(&service, "Gryzor").await;
    assert_eq!(related.suggestions().len(), MAX_SUGGESTIONS);
}

#[tokio::test]
async fn empty_answer_is_empty_state() {
    let service = FakeService::new(|| Ok(Vec::new()));
    assert_eq!(fetch_related(&service, "Forms").await, RelatedGames::Empty);
}

#[tokio::test]
async fn failure_becomes_failed_state() {
    let service = FakeService::new(|| Err(SuggestError::RateLimit));
    let related = fetch_related(&service, "Amsthrees").await;

    assert!(matches!(related, RelatedGames::Failed(ref m) if m.contains("Rate limited")));
    assert!(related.suggestions().is_empty());
}

#[tokio::test]
async fn blank_title_does_not_call_service() {
    let service = FakeService::new(|| Ok(vec![suggestion("Never")]));
    assert_eq!(fetch_related(&service, "   ").await, RelatedGames::Empty);
    assert!(service.asked.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_endpoint_becomes_failed_state() {
    // Port 9 (discard) on localhost is not expected to run an HTTP server.
    let client = GenkitSuggestClient::new(SuggestConfig {
        endpoint: "http://127.0.0.1:9/suggestRelatedGames".to_string(),
        api_key: None,
    })
    .unwrap();

    let related = fetch_related(&client, "DrRoland").await;
    assert!(matches!(related, RelatedGames::Failed(_)));
}
