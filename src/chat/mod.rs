// src/chat/mod.rs — Turn controller
//
// Owns one /chat turn end to end: session bookkeeping, the
// clarify-vs-finalize decision, and history writes. Structured data is only
// ever attached to a turn after the extractor has validated it.

pub mod extractor;
pub mod prompts;
pub mod triggers;

use std::sync::Arc;

use uuid::Uuid;

use crate::infra::config::ChatConfig;
use crate::infra::errors::ChatError;
use crate::provider::{ChatRequest, Message, ModelProvider, Role};
use crate::schema::ProjectData;
use crate::store::StoreHandle;
use crate::util::truncate_str;

use extractor::Extractor;

/// Result of one completed chat turn.
pub struct TurnOutcome {
    pub session_id: String,
    pub reply: String,
    pub project_data: Option<ProjectData>,
}

pub struct ChatEngine {
    provider: Arc<dyn ModelProvider>,
    model: String,
    store: StoreHandle,
    extractor: Extractor,
    config: ChatConfig,
}

impl ChatEngine {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        model: String,
        store: StoreHandle,
        config: ChatConfig,
    ) -> Self {
        let extractor = Extractor::new(
            provider.clone(),
            model.clone(),
            config.max_extract_attempts,
            // Extraction wants near-deterministic output regardless of the
            // conversational temperature.
            0.2,
            config.max_tokens,
        );
        Self {
            provider,
            model,
            store,
            extractor,
            config,
        }
    }

    /// Handle one user turn: append it to the session, decide between a
    /// clarifying question and finalization, and append the assistant reply.
    pub async fn handle_turn(
        &self,
        user_id: &str,
        session_id: Option<&str>,
        content: &str,
    ) -> Result<TurnOutcome, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::Validation("content must not be empty".into()));
        }

        let session_id = match session_id {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        tracing::info!(
            session = %session_id,
            user = %user_id,
            "chat turn: {}",
            truncate_str(content, 80)
        );

        self.store
            .ensure_session(session_id.clone(), user_id.to_string())
            .await?;

        // History before this turn, then the new user message on top.
        let mut history = self.load_history(&session_id).await?;
        history.push(Message::user(content));

        self.store
            .insert_message(
                Uuid::new_v4().to_string(),
                session_id.clone(),
                Role::User.as_str().into(),
                content.to_string(),
            )
            .await?;

        let (reply, project_data) =
            if triggers::is_finalize_trigger(content, self.config.legacy_confirmations) {
                self.finalize(&session_id, &history).await?
            } else {
                (self.clarify(&history).await?, None)
            };

        self.store
            .insert_message(
                Uuid::new_v4().to_string(),
                session_id.clone(),
                Role::Assistant.as_str().into(),
                reply.clone(),
            )
            .await?;

        Ok(TurnOutcome {
            session_id,
            reply,
            project_data,
        })
    }

    /// One conversational LLM call with the intake persona.
    async fn clarify(&self, history: &[Message]) -> Result<String, ChatError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: history.to_vec(),
            system: Some(prompts::intake_prompt()),
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
            json_mode: false,
        };
        let response = self.provider.chat(request).await?;
        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "clarify turn complete"
        );
        Ok(response.content)
    }

    /// Run extraction over the full history. A validation-exhausted failure
    /// becomes a follow-up question, not an error: the caller gets a reply
    /// asking for the missing pieces and no project_data.
    async fn finalize(
        &self,
        session_id: &str,
        history: &[Message],
    ) -> Result<(String, Option<ProjectData>), ChatError> {
        match self.extractor.extract(history).await {
            Ok(data) => {
                let payload = serde_json::to_string(&data)
                    .map_err(|e| ChatError::Other(anyhow::anyhow!(e)))?;
                self.store
                    .insert_project_data(
                        Uuid::new_v4().to_string(),
                        session_id.to_string(),
                        payload,
                    )
                    .await?;
                tracing::info!(session = %session_id, "project data extracted and stored");
                Ok((prompts::finalized_reply(), Some(data)))
            }
            Err(ChatError::ExtractionFailed { attempts, issues }) => {
                tracing::warn!(
                    session = %session_id,
                    attempts,
                    "extraction exhausted, asking a follow-up"
                );
                Ok((prompts::extraction_failed_reply(&issues), None))
            }
            Err(e) => Err(e),
        }
    }

    async fn load_history(&self, session_id: &str) -> Result<Vec<Message>, ChatError> {
        let rows = self.store.query_messages(session_id.to_string()).await?;
        Ok(rows
            .into_iter()
            .map(|row| Message {
                role: Role::parse(&row.role),
                content: row.content,
            })
            .collect())
    }
}
