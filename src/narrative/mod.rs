//! Text cards generated from a player's season.
//!
//! The deterministic analysis never calls a model directly: it hands a
//! [`YearReviewInput`] or [`ComparisonInput`] to a [`Narrator`] and goes
//! through [`year_review_or_fallback`] / [`comparison_or_fallback`], which
//! swap in fixed cards whenever generation fails.

pub mod fallback;
pub mod llm;
pub mod prompt;

use crate::analysis::{Achievement, AggregatedStats};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use llm::LlmNarrator;

fn default_kind() -> String {
    "roast".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Postcard {
    pub title: String,
    pub content: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<String>,
}

impl Postcard {
    pub fn new(title: impl Into<String>, content: impl Into<String>, kind: &str) -> Self {
        Postcard {
            title: title.into(),
            content: content.into(),
            kind: kind.to_string(),
            stat: None,
        }
    }

    pub fn with_stat(mut self, stat: impl Into<String>) -> Self {
        self.stat = Some(stat.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearReview {
    pub postcards: Vec<Postcard>,
    /// Labels of what was roasted, fed back as `used_topics` on regeneration.
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct YearReviewInput<'a> {
    pub season: i32,
    pub stats: &'a AggregatedStats,
    pub rank: &'a str,
    pub achievements: &'a [Achievement],
    pub used_topics: &'a [String],
}

#[derive(Debug, Clone, Copy)]
pub struct ComparisonInput<'a> {
    pub season: i32,
    pub your_stats: &'a AggregatedStats,
    pub your_rank: &'a str,
    pub pro_stats: &'a AggregatedStats,
    pub pro_rank: &'a str,
    pub pro_name: &'a str,
    pub pro_team: &'a str,
}

pub trait Narrator: Send + Sync {
    fn year_review(&self, input: &YearReviewInput<'_>) -> Result<YearReview, AppError>;

    fn comparison(&self, input: &ComparisonInput<'_>) -> Result<Vec<Postcard>, AppError>;
}

/// Used when no text-generation key is configured.
pub struct OfflineNarrator;

impl Narrator for OfflineNarrator {
    fn year_review(&self, _input: &YearReviewInput<'_>) -> Result<YearReview, AppError> {
        Err(AppError::NarrativeError("no text-generation key configured".to_string()))
    }

    fn comparison(&self, _input: &ComparisonInput<'_>) -> Result<Vec<Postcard>, AppError> {
        Err(AppError::NarrativeError("no text-generation key configured".to_string()))
    }
}

pub fn year_review_or_fallback(narrator: &dyn Narrator, input: &YearReviewInput<'_>) -> YearReview {
    match narrator.year_review(input) {
        Ok(review) if !review.postcards.is_empty() => review,
        Ok(_) => {
            warn!("narrator returned no postcards, using fallback");
            fallback::year_review(input)
        }
        Err(e) => {
            warn!(error = %e, "year review generation failed, using fallback");
            fallback::year_review(input)
        }
    }
}

pub fn comparison_or_fallback(narrator: &dyn Narrator, input: &ComparisonInput<'_>) -> Vec<Postcard> {
    match narrator.comparison(input) {
        Ok(cards) if !cards.is_empty() => cards,
        Ok(_) => {
            warn!("narrator returned no comparison postcards, using fallback");
            fallback::comparison(input)
        }
        Err(e) => {
            warn!(error = %e, "comparison generation failed, using fallback");
            fallback::comparison(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Result<YearReview, String>);

    impl Narrator for Scripted {
        fn year_review(&self, _input: &YearReviewInput<'_>) -> Result<YearReview, AppError> {
            self.0.clone().map_err(AppError::NarrativeError)
        }

        fn comparison(&self, _input: &ComparisonInput<'_>) -> Result<Vec<Postcard>, AppError> {
            self.0
                .clone()
                .map(|r| r.postcards)
                .map_err(AppError::NarrativeError)
        }
    }

    fn input<'a>(stats: &'a AggregatedStats) -> YearReviewInput<'a> {
        YearReviewInput {
            season: 2025,
            stats,
            rank: "GOLD II",
            achievements: &[],
            used_topics: &[],
        }
    }

    #[test]
    fn generated_cards_pass_through() {
        let review = YearReview {
            postcards: vec![Postcard::new("HI", "there", "roast")],
            topics: vec!["kda".to_string()],
        };
        let stats = AggregatedStats::default();
        let out = year_review_or_fallback(&Scripted(Ok(review.clone())), &input(&stats));
        assert_eq!(out, review);
    }

    #[test]
    fn failures_and_empty_output_fall_back() {
        let stats = AggregatedStats::default();
        let expected = fallback::year_review(&input(&stats));

        let failed = year_review_or_fallback(&Scripted(Err("boom".to_string())), &input(&stats));
        let empty = year_review_or_fallback(&Scripted(Ok(YearReview::default())), &input(&stats));
        let offline = year_review_or_fallback(&OfflineNarrator, &input(&stats));

        assert_eq!(failed, expected);
        assert_eq!(empty, expected);
        assert_eq!(offline, expected);
        assert!(expected.topics.is_empty());
    }

    #[test]
    fn comparison_falls_back_too() {
        let stats = AggregatedStats::default();
        let input = ComparisonInput {
            season: 2025,
            your_stats: &stats,
            your_rank: "SILVER I",
            pro_stats: &stats,
            pro_rank: "CHALLENGER I",
            pro_name: "Faker",
            pro_team: "T1",
        };
        let cards = comparison_or_fallback(&OfflineNarrator, &input);
        assert_eq!(cards, fallback::comparison(&input));
    }

    #[test]
    fn postcard_serializes_kind_as_type() {
        let card = Postcard::new("THE NUMBERS", "50 games.", "stat").with_stat("GOLD II");
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["type"], "stat");
        assert_eq!(value["stat"], "GOLD II");

        let plain = serde_json::to_value(Postcard::new("A", "b", "roast")).unwrap();
        assert!(plain.get("stat").is_none());
    }
}
