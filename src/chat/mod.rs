//! Conversation handler for the guidelines Q&A page.
//!
//! The transcript is owned by the caller: each turn takes the full history
//! plus the new question and returns the reply together with the extended
//! history, so the handler itself keeps no state between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm::{ChatMessage, LlmClient, LlmRequest, MessageRole};

/// Shown when the completion provider fails or returns nothing.
pub const FALLBACK_REPLY: &str =
    "The assistant could not produce an answer right now. Please try again in a moment.";

/// Who spoke a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the caller-owned transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Translate the system prompt, transcript, and new question into provider
/// messages, preserving turn order.
pub fn build_messages(
    system_prompt: &str,
    history: &[ChatTurn],
    question: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::new(MessageRole::System, system_prompt));

    for turn in history {
        let role = match turn.role {
            ChatRole::User => MessageRole::User,
            ChatRole::Assistant => MessageRole::Assistant,
        };
        messages.push(ChatMessage::new(role, turn.text.as_str()));
    }

    messages.push(ChatMessage::new(MessageRole::User, question));
    messages
}

/// Record a completed question/answer exchange on the transcript.
pub fn append_exchange(mut history: Vec<ChatTurn>, question: &str, reply: &str) -> Vec<ChatTurn> {
    history.push(ChatTurn::user(question));
    history.push(ChatTurn::assistant(reply));
    history
}

/// Answer one question against the given transcript.
///
/// Provider failures never surface to the user; the reply degrades to
/// [`FALLBACK_REPLY`] and the exchange is still recorded.
pub async fn answer_question(
    llm: &LlmClient,
    model: &str,
    system_prompt: &str,
    history: Vec<ChatTurn>,
    question: &str,
) -> (String, Vec<ChatTurn>) {
    let request = LlmRequest::new(model, build_messages(system_prompt, &history, question));

    let reply = match llm.execute(request).await {
        Ok(response) if !response.text.trim().is_empty() => {
            debug!(provider = %response.provider, model = %response.model, "completion received");
            response.text
        }
        Ok(_) => {
            warn!(model, "completion provider returned an empty reply");
            FALLBACK_REPLY.to_string()
        }
        Err(err) => {
            warn!(?err, model, "chat completion failed");
            FALLBACK_REPLY.to_string()
        }
    };

    let history = append_exchange(history, question, &reply);
    (reply, history)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_lead_with_system_prompt_and_end_with_question() {
        let history = vec![ChatTurn::user("first"), ChatTurn::assistant("answer")];
        let messages = build_messages("be helpful", &history, "second");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].text, "be helpful");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[3].role, MessageRole::User);
        assert_eq!(messages[3].text, "second");
    }

    #[test]
    fn exchange_is_appended_in_order() {
        let history = append_exchange(Vec::new(), "how long may an abstract be?", "150 words");

        assert_eq!(
            history,
            vec![
                ChatTurn::user("how long may an abstract be?"),
                ChatTurn::assistant("150 words"),
            ]
        );

        let history = append_exchange(history, "and pages?", "40 pages");
        assert_eq!(history.len(), 4);
        assert_eq!(history[2].role, ChatRole::User);
    }
}
