use std::env;

use crate::evaluator;

const CHAT_MODEL_VAR: &str = "CHAT_MODEL";
const CHAT_SYSTEM_PROMPT_VAR: &str = "CHAT_SYSTEM_PROMPT";

const GUIDELINE_ASSISTANT_PROMPT: &str = "You are an assistant for authors preparing manuscripts for top management journals. \
Answer questions about submission guidelines, formatting, abstracts, keywords, and journal fit. \
Be concise and factual; when a question falls outside the journals you know, say so instead of guessing. \
The journals you know, with their submission limits, are listed below.";

/// Runtime settings resolved once at startup.
#[derive(Clone, Debug)]
pub struct Settings {
    pub chat: ChatSettings,
}

/// Model and prompt used by the Q&A page.
#[derive(Clone, Debug)]
pub struct ChatSettings {
    pub model: String,
    pub system_prompt: String,
}

impl Settings {
    /// Read settings from the environment, falling back to the built-in
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let model = env::var(CHAT_MODEL_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(default_chat_model);
        let system_prompt = env::var(CHAT_SYSTEM_PROMPT_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(default_chat_prompt);

        Self {
            chat: ChatSettings {
                model,
                system_prompt,
            },
        }
    }
}

fn default_chat_model() -> String {
    "openrouter/openai/gpt-4o-mini".to_string()
}

fn default_chat_prompt() -> String {
    let mut prompt = String::from(GUIDELINE_ASSISTANT_PROMPT);
    for profile in evaluator::builtin_profiles() {
        prompt.push_str(&format!(
            "\n- {}: abstract at most {} words, manuscripts at most {:.0} estimated pages ({:.0} words per page). Focus: {}",
            profile.name,
            profile.max_abstract_words,
            profile.max_pages,
            evaluator::WORDS_PER_PAGE,
            profile.focus
        ));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_covers_every_builtin_journal() {
        let prompt = default_chat_prompt();
        for profile in evaluator::builtin_profiles() {
            assert!(prompt.contains(&profile.name), "missing {}", profile.name);
        }
    }

    #[test]
    fn default_model_is_provider_prefixed() {
        assert!(default_chat_model().starts_with("openrouter/"));
    }
}
