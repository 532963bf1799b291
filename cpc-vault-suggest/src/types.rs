use serde::{Deserialize, Serialize};

/// Most suggestions returned for one title.
pub const MAX_SUGGESTIONS: usize = 3;

/// A related game proposed by the suggestion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Request body for a flow invocation: `{"data": {"gameTitle": ...}}`.
#[derive(Debug, Serialize)]
pub struct FlowRequest<'a> {
    pub data: FlowInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowInput<'a> {
    pub game_title: &'a str,
}

impl<'a> FlowRequest<'a> {
    pub fn new(game_title: &'a str) -> Self {
        Self {
            data: FlowInput { game_title },
        }
    }
}

/// Response body from a flow invocation.
///
/// A failed flow answers with `error` instead of `result`.
#[derive(Debug, Deserialize)]
pub struct FlowResponse {
    #[serde(default)]
    pub result: Option<FlowOutput>,
    #[serde(default)]
    pub error: Option<FlowError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowOutput {
    #[serde(default)]
    pub related_games: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
pub struct FlowError {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: String,
}
