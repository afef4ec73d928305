use std::sync::Arc;

use super::catalog::Catalog;
use super::domain::IssueAttributes;

const UPVOTE_WEIGHT: f64 = 0.5;
const MAX_ENGAGEMENT_BONUS: f64 = 15.0;
const URGENT_LANGUAGE_POINTS: f64 = 5.0;
const MAX_SCORE: f64 = 100.0;

/// Composite 0-100 priority ranking, independent of the routed department.
pub struct UrgencyScorer {
    catalog: Arc<Catalog>,
}

impl UrgencyScorer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn score(&self, attributes: &IssueAttributes) -> u8 {
        self.score_parts(
            &attributes.title,
            &attributes.description,
            &attributes.category,
            attributes.priority.as_str(),
            &attributes.location,
            attributes.upvotes,
        )
    }

    /// Scores loose inputs; an unrecognised `priority` or `category` uses the defaults.
    pub fn score_parts(
        &self,
        title: &str,
        description: &str,
        category: &str,
        priority: &str,
        location: &str,
        upvotes: u32,
    ) -> u8 {
        let mut score = self.catalog.priority_base_score(priority);
        score *= self.catalog.category_multiplier(category);
        score *= self.catalog.location_factor(location);
        score += engagement_bonus(upvotes);
        score += URGENT_LANGUAGE_POINTS * self.urgent_terms(title, description) as f64;

        score.min(MAX_SCORE).max(0.0).round() as u8
    }

    /// Distinct urgent terms mentioned anywhere in the title or description.
    pub fn urgent_terms(&self, title: &str, description: &str) -> usize {
        let text = format!("{title} {description}").to_lowercase();
        self.catalog
            .urgent_keywords()
            .iter()
            .filter(|keyword| text.contains(keyword.as_str()))
            .count()
    }
}

fn engagement_bonus(upvotes: u32) -> f64 {
    (f64::from(upvotes) * UPVOTE_WEIGHT).min(MAX_ENGAGEMENT_BONUS)
}
