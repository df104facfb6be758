use super::prompt::{comparison_prompt, year_review_prompt};
use super::{ComparisonInput, Narrator, Postcard, YearReview, YearReviewInput};
use crate::config::LlmConfig;
use crate::error::AppError;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Either a bare card array or `{postcards, topics}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CardsPayload {
    Cards(Vec<Postcard>),
    Review {
        #[serde(default)]
        postcards: Vec<Postcard>,
        #[serde(default)]
        topics: Vec<String>,
    },
}

impl From<CardsPayload> for YearReview {
    fn from(payload: CardsPayload) -> Self {
        match payload {
            CardsPayload::Cards(postcards) => YearReview {
                postcards,
                topics: Vec::new(),
            },
            CardsPayload::Review { postcards, topics } => YearReview { postcards, topics },
        }
    }
}

/// Strips a surrounding Markdown code fence (```json ... ```), if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub fn parse_cards(text: &str) -> Result<YearReview, AppError> {
    let payload: CardsPayload = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| AppError::NarrativeError(format!("unparseable model output: {}", e)))?;
    Ok(payload.into())
}

/// Generates cards with a Messages-API compatible text model.
pub struct LlmNarrator {
    config: LlmConfig,
    agent: ureq::Agent,
}

impl LlmNarrator {
    pub fn new(config: LlmConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        LlmNarrator { config, agent }
    }

    fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": MAX_TOKENS,
            "temperature": 1.0,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response: MessagesResponse = self
            .agent
            .post(&self.config.endpoint)
            .set("x-api-key", &self.config.api_key)
            .set("anthropic-version", API_VERSION)
            .send_json(body)
            .map_err(|e| AppError::NarrativeError(e.to_string()))?
            .into_json()
            .map_err(|e| AppError::NarrativeError(e.to_string()))?;

        let text = response
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or_else(|| AppError::NarrativeError("model returned no text".to_string()))?;

        debug!(chars = text.len(), "model output received");
        Ok(text)
    }
}

impl Narrator for LlmNarrator {
    fn year_review(&self, input: &YearReviewInput<'_>) -> Result<YearReview, AppError> {
        let text = self.complete(&year_review_prompt(input))?;
        parse_cards(&text)
    }

    fn comparison(&self, input: &ComparisonInput<'_>) -> Result<Vec<Postcard>, AppError> {
        let text = self.complete(&comparison_prompt(input))?;
        Ok(parse_cards(&text)?.postcards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_with_topics() {
        let review = parse_cards(
            r#"{"postcards": [{"title": "T", "content": "c", "type": "roast"}], "topics": ["kda"]}"#,
        )
        .unwrap();
        assert_eq!(review.postcards.len(), 1);
        assert_eq!(review.topics, vec!["kda"]);
    }

    #[test]
    fn parses_bare_array_inside_code_fence() {
        let text = "```json\n[{\"title\": \"T\", \"content\": \"c\"}]\n```";
        let review = parse_cards(text).unwrap();
        assert_eq!(review.postcards[0].kind, "roast");
        assert!(review.topics.is_empty());
    }

    #[test]
    fn prose_is_a_narrative_error() {
        let err = parse_cards("Sure! Here are some roasts:").unwrap_err();
        assert!(matches!(err, AppError::NarrativeError(_)));
    }

    #[test]
    fn fence_without_language_tag() {
        assert_eq!(strip_code_fence("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("  {}  "), "{}");
    }
}
