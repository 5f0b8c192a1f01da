use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    config::{ChatSettings, Settings},
    guidelines::GuidelinesClient,
    llm::LlmClient,
};

#[derive(Clone)]
pub struct AppState {
    settings: Arc<Settings>,
    llm: LlmClient,
    guidelines: GuidelinesClient,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let llm = LlmClient::from_env().context("failed to initialize LLM client")?;
        let guidelines = GuidelinesClient::from_env();
        if guidelines.is_configured() {
            info!("remote guidelines lookup enabled");
        }
        let settings = Settings::from_env();

        Ok(Self {
            settings: Arc::new(settings),
            llm,
            guidelines,
        })
    }

    pub fn llm_client(&self) -> LlmClient {
        self.llm.clone()
    }

    pub fn guidelines(&self) -> &GuidelinesClient {
        &self.guidelines
    }

    pub fn chat_settings(&self) -> &ChatSettings {
        &self.settings.chat
    }
}
