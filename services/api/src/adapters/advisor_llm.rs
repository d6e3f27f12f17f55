//! services/api/src/adapters/advisor_llm.rs
//!
//! This module contains the adapter for the course advisor LLM.
//! It implements the `CourseAdvisorService` port from the `core` crate against any
//! OpenAI-compatible chat-completions endpoint (Gemini's, by default).

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client, error::OpenAIError,
};
use async_trait::async_trait;
use institute_core::{
    domain::{ChatMessage, ChatRole},
    ports::{CourseAdvisorService, PortError, PortResult},
};
use tracing::{debug, warn};

/// Sent when the provider answers with no text at all.
pub const FALLBACK_REPLY: &str =
    "I'm here to help you find the perfect course. Could you tell me about your learning goals?";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CourseAdvisorService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiAdvisorAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    system_prompt: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiAdvisorAdapter {
    /// Creates a new `OpenAiAdvisorAdapter` with an already rendered system prompt.
    pub fn new(
        client: Client<OpenAIConfig>,
        model: String,
        system_prompt: String,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            model,
            system_prompt,
            temperature,
            max_tokens,
        }
    }

    /// System prompt, then prior turns oldest first, then the new user message.
    fn build_messages(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(history.len() + 2);
        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.as_str())
                .build()?
                .into(),
        );

        for turn in history {
            let entry: ChatCompletionRequestMessage = match turn.role {
                ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.content.as_str())
                    .build()?
                    .into(),
                ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(turn.content.as_str())
                    .build()?
                    .into(),
            };
            messages.push(entry);
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(message)
                .build()?
                .into(),
        );
        Ok(messages)
    }
}

/// Trims the provider's text, substituting the fallback reply when nothing is left.
fn reply_or_fallback(content: Option<String>) -> String {
    match content.map(|c| c.trim().to_string()) {
        Some(text) if !text.is_empty() => text,
        _ => {
            warn!("Course advisor returned no text; using fallback reply");
            FALLBACK_REPLY.to_string()
        }
    }
}

//=========================================================================================
// `CourseAdvisorService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CourseAdvisorService for OpenAiAdvisorAdapter {
    /// Relays one user message, with its history, to the provider. No retry.
    async fn recommend(&self, message: &str, history: &[ChatMessage]) -> PortResult<String> {
        debug!(turns = history.len(), "Requesting course recommendation");

        let messages = self
            .build_messages(message, history)
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .n(1)
            .build()
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        // Timeouts, transport errors and provider rejections all collapse into Upstream.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        Ok(reply_or_fallback(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> OpenAiAdvisorAdapter {
        let client = Client::with_config(OpenAIConfig::new().with_api_key("test-key"));
        OpenAiAdvisorAdapter::new(
            client,
            "gemini-2.5-flash".to_string(),
            "You are a helpful course advisor.".to_string(),
            0.7,
            200,
        )
    }

    fn turn(role: ChatRole, content: &str, ts: i64) -> ChatMessage {
        ChatMessage {
            id: ts.to_string(),
            role,
            content: content.to_string(),
            timestamp: ts,
        }
    }

    #[test]
    fn messages_keep_history_order_and_end_with_the_new_question() {
        let history = vec![
            turn(ChatRole::User, "I want an office job", 1),
            turn(ChatRole::Assistant, "DCA is a good start.", 2),
            turn(ChatRole::User, "How long is it?", 3),
        ];
        let messages = adapter().build_messages("And the fees?", &history).unwrap();

        assert_eq!(messages.len(), 5);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(messages[2], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(messages[3], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(messages[4], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn empty_history_sends_system_and_user_only() {
        let messages = adapter().build_messages("Hello", &[]).unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn blank_completion_falls_back() {
        assert_eq!(reply_or_fallback(None), FALLBACK_REPLY);
        assert_eq!(reply_or_fallback(Some("  \n".to_string())), FALLBACK_REPLY);
        assert_eq!(
            reply_or_fallback(Some(" Try Tally Prime with GST. ".to_string())),
            "Try Tally Prime with GST."
        );
    }
}
