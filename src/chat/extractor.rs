// src/chat/extractor.rs — Conversation-to-structured-data extraction
//
// Asks the model for JSON-mode output over the full session history, then
// parses, backfills generated fields, normalizes the legacy single-talent
// shape, and validates. Invalid output is re-prompted with the issue list a
// bounded number of times; exhaustion fails rather than returning partial
// data.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::prompts;
use crate::infra::errors::ChatError;
use crate::provider::{ChatRequest, Message, ModelProvider};
use crate::schema::{validator, ProjectData};

pub struct Extractor {
    provider: Arc<dyn ModelProvider>,
    model: String,
    max_attempts: u32,
    temperature: f32,
    max_tokens: u32,
}

impl Extractor {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        model: String,
        max_attempts: u32,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            provider,
            model,
            max_attempts: max_attempts.max(1),
            temperature,
            max_tokens,
        }
    }

    /// Extract a validated payload from the session history.
    pub async fn extract(&self, history: &[Message]) -> Result<ProjectData, ChatError> {
        let mut messages: Vec<Message> = history.to_vec();
        let mut last_issues: Vec<String> = Vec::new();

        for attempt in 1..=self.max_attempts {
            let request = ChatRequest {
                model: self.model.clone(),
                messages: messages.clone(),
                system: Some(prompts::extraction_prompt()),
                max_tokens: Some(self.max_tokens),
                temperature: Some(self.temperature),
                json_mode: true,
            };

            let response = self.provider.chat(request).await?;

            match parse_payload(&response.content) {
                Ok(data) => {
                    tracing::debug!(attempt, "extraction succeeded");
                    return Ok(data);
                }
                Err(issues) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        "extraction attempt rejected: {}",
                        issues.join("; ")
                    );
                    // Carry the rejected output and the issues into the next
                    // attempt so the model can repair its own JSON.
                    messages.push(Message::assistant(response.content.clone()));
                    messages.push(Message::user(prompts::repair_prompt(&issues)));
                    last_issues = issues;
                }
            }
        }

        Err(ChatError::ExtractionFailed {
            attempts: self.max_attempts,
            issues: last_issues,
        })
    }
}

/// Parse a model completion into a validated payload.
///
/// Tolerates markdown fences and surrounding prose, backfills fields the
/// model is allowed to omit, and accepts the earlier-revision
/// `{"project": ..., "talent": {...}}` single-record shape.
pub fn parse_payload(content: &str) -> Result<ProjectData, Vec<String>> {
    let raw = strip_code_fences(content);

    let mut value: Value = serde_json::from_str(raw)
        .map_err(|e| vec![format!("output is not valid JSON: {e}")])?;

    normalize_talents(&mut value);
    backfill_generated_fields(&mut value);

    let data: ProjectData = serde_json::from_value(value)
        .map_err(|e| vec![format!("output does not match the schema: {e}")])?;

    validator::validate(&data)?;
    Ok(data)
}

/// Strip a surrounding markdown code fence, if present, and any prose around
/// it by locating the outermost JSON object.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();

    let inner = if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the info string ("json") up to the first newline
        let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
        rest.rsplit_once("```").map(|(body, _)| body).unwrap_or(rest)
    } else {
        trimmed
    };

    // Fall back to the outermost braces when the model wrapped JSON in prose
    match (inner.find('{'), inner.rfind('}')) {
        (Some(start), Some(end)) if end > start => &inner[start..=end],
        _ => inner.trim(),
    }
}

/// Fold the legacy `talent` object into the `talents` array.
fn normalize_talents(value: &mut Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    if obj.contains_key("talents") {
        return;
    }
    if let Some(talent) = obj.remove("talent") {
        let list = match talent {
            Value::Array(items) => items,
            single => vec![single],
        };
        obj.insert("talents".into(), Value::Array(list));
    }
}

/// Fill the fields the model may omit: ids, slug, timestamps, counters.
fn backfill_generated_fields(value: &mut Value) {
    let now = Utc::now().to_rfc3339();

    if let Some(project) = value.get_mut("project").and_then(Value::as_object_mut) {
        if !is_nonempty_string(project.get("id")) {
            project.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
        }
        if !is_nonempty_string(project.get("slug")) {
            // Empty title slugifies to an empty string, which the validator
            // then reports alongside the title issue.
            let title = project.get("title").and_then(Value::as_str).unwrap_or("");
            project.insert("slug".into(), Value::String(slug::slugify(title)));
        }
        for field in ["createdAt", "updatedAt", "fundsUntil"] {
            if !is_nonempty_string(project.get(field)) {
                project.insert(field.into(), Value::String(now.clone()));
            }
        }
        if project.get("viewed").and_then(Value::as_u64).is_none() {
            project.insert("viewed".into(), Value::from(0));
        }
    }

    if let Some(talents) = value.get_mut("talents").and_then(Value::as_array_mut) {
        for talent in talents.iter_mut().filter_map(Value::as_object_mut) {
            if !is_nonempty_string(talent.get("id")) {
                talent.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
            }
            for field in ["createdAt", "updatedAt"] {
                if !is_nonempty_string(talent.get(field)) {
                    talent.insert(field.into(), Value::String(now.clone()));
                }
            }
        }
    }
}

fn is_nonempty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}
