//! Optional remote lookup of submission guidelines for journals outside the
//! built-in table.

use std::env;

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::evaluator::JournalProfile;

/// Guideline record returned by the remote service.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteGuidelines {
    pub focus: String,
    pub abstract_word_limit: usize,
    pub max_pages: f64,
    pub formatting_style: String,
    pub reference_style: String,
}

impl RemoteGuidelines {
    /// Assemble an ad-hoc profile usable by the evaluation core.
    pub fn into_profile(self, journal: &str) -> JournalProfile {
        JournalProfile {
            id: journal.trim().to_lowercase(),
            name: journal.trim().to_string(),
            focus: self.focus,
            max_abstract_words: self.abstract_word_limit,
            max_pages: self.max_pages,
            formatting: self.formatting_style,
            reference_style: self.reference_style,
        }
    }
}

/// Client for the guidelines service. When no endpoint is configured every
/// lookup reports "not found".
#[derive(Clone)]
pub struct GuidelinesClient {
    http: Client,
    endpoint: Option<String>,
}

impl GuidelinesClient {
    /// Build a client from the `GUIDELINES_URL` environment variable.
    pub fn from_env() -> Self {
        Self {
            http: Client::new(),
            endpoint: env::var("GUIDELINES_URL").ok(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Look up guidelines for a journal by name.
    ///
    /// The call has a binary outcome: a structured record, or `None`. Any
    /// transport error, non-success status, or unparseable payload is
    /// downgraded to `None` with a log line; the caller falls back to its
    /// own messaging.
    pub async fn fetch(&self, journal: &str) -> Option<RemoteGuidelines> {
        let endpoint = self.endpoint.as_ref()?;

        let response = match self
            .http
            .get(endpoint)
            .query(&[("journal", journal)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(?err, journal, "guidelines lookup failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                status = %response.status(),
                journal,
                "guidelines service returned no record"
            );
            return None;
        }

        match response.json::<RemoteGuidelines>().await {
            Ok(guidelines) => Some(guidelines),
            Err(err) => {
                warn!(?err, journal, "guidelines payload was not parseable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_record_becomes_a_profile() {
        let remote = RemoteGuidelines {
            focus: "Applied organizational research.".to_string(),
            abstract_word_limit: 250,
            max_pages: 35.0,
            formatting_style: "Arial, size 11, double-spaced".to_string(),
            reference_style: "Chicago".to_string(),
        };

        let profile = remote.into_profile(" Journal of Applied Things ");
        assert_eq!(profile.id, "journal of applied things");
        assert_eq!(profile.name, "Journal of Applied Things");
        assert_eq!(profile.max_abstract_words, 250);
        assert_eq!(profile.max_pages, 35.0);
    }

    #[test]
    fn unconfigured_client_is_inert() {
        let client = GuidelinesClient {
            http: Client::new(),
            endpoint: None,
        };
        assert!(!client.is_configured());
    }
}
