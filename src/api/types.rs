// src/api/types.rs

use serde::{Deserialize, Serialize};

use crate::schema::ProjectData;

/// Request body for POST /chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnRequest {
    pub user_id: String,
    #[serde(default)]
    pub session_id: Option<String>,
    pub content: String,
}

/// Response body for POST /chat.
///
/// `messages` is a single object, not a list — a quirk of the original API
/// contract that clients already depend on.
#[derive(Debug, Serialize)]
pub struct ChatTurnResponse {
    pub session_id: String,
    pub messages: AssistantMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_data: Option<ProjectData>,
}

#[derive(Debug, Serialize)]
pub struct AssistantMessage {
    pub role: String,
    pub content: String,
}

impl AssistantMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
