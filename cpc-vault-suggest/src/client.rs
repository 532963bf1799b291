use tokio::time::Duration;

use crate::config::SuggestConfig;
use crate::error::SuggestError;
use crate::types::{FlowRequest, FlowResponse, MAX_SUGGESTIONS, Suggestion};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for a hosted `suggestRelatedGames` flow.
pub struct GenkitSuggestClient {
    http: reqwest::Client,
    config: SuggestConfig,
}

impl GenkitSuggestClient {
    pub fn new(config: SuggestConfig) -> Result<Self, SuggestError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Ask the flow for games related to `title`.
    ///
    /// At most [`MAX_SUGGESTIONS`] are returned; entries without a title are dropped.
    pub async fn related_games(&self, title: &str) -> Result<Vec<Suggestion>, SuggestError> {
        let mut request = self
            .http
            .post(&self.config.endpoint)
            .json(&FlowRequest::new(title));
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        log::debug!("Requesting related games for '{}'", title);
        let resp = request.send().await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SuggestError::InvalidCredentials(
                "API key rejected".to_string(),
            ));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SuggestError::RateLimit);
        }
        if !status.is_success() {
            return Err(SuggestError::ServerError {
                status: status.as_u16(),
                message: snippet(&text).to_string(),
            });
        }

        parse_flow_response(&text)
    }
}

/// Decode a flow response body into at most [`MAX_SUGGESTIONS`] suggestions.
pub fn parse_flow_response(text: &str) -> Result<Vec<Suggestion>, SuggestError> {
    let response: FlowResponse = serde_json::from_str(text).map_err(|e| {
        SuggestError::Api(format!(
            "Failed to parse flow response: {e}. Response: {}",
            snippet(text)
        ))
    })?;

    if let Some(err) = response.error {
        let status = err.status.unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(SuggestError::Api(format!("{status}: {}", err.message)));
    }

    let output = response
        .result
        .ok_or_else(|| SuggestError::Api("Flow response has no result".to_string()))?;

    Ok(output
        .related_games
        .into_iter()
        .filter(|s| !s.title.trim().is_empty())
        .take(MAX_SUGGESTIONS)
        .collect())
}

fn snippet(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}
