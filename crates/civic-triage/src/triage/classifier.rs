use std::sync::Arc;

use super::catalog::{Catalog, Department};
use super::domain::ClassificationResult;

const KEYWORD_HIT_POINTS: f64 = 10.0;
const REPEAT_MENTION_POINTS: f64 = 2.0;
const CONFIDENCE_DIVISOR: f64 = 20.0;
const FALLBACK_REASON: &str = "Categorized based on content analysis and departmental expertise";

/// Raw score of one department before selection, kept for audits.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentScore {
    pub department_id: String,
    pub score: f64,
    pub matched_keywords: Vec<String>,
}

impl DepartmentScore {
    pub fn confidence(&self) -> u8 {
        confidence_from_score(self.score)
    }
}

/// Routes issue text to the department whose keywords and weighting fit best.
pub struct DepartmentClassifier {
    catalog: Arc<Catalog>,
}

impl DepartmentClassifier {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn classify(
        &self,
        title: &str,
        description: &str,
        category: &str,
        location: &str,
    ) -> ClassificationResult {
        let scores = self.score_departments(title, description, category, location);
        let departments = self.catalog.departments();

        // Strict comparison keeps the earliest department on ties.
        let mut best = 0;
        for (index, candidate) in scores.iter().enumerate().skip(1) {
            if candidate.score > scores[best].score {
                best = index;
            }
        }

        let department = &departments[best];
        let winner = &scores[best];
        let reasoning = self.reasoning(department, &winner.matched_keywords, location);

        ClassificationResult {
            department_id: department.id.clone(),
            department_name: department.name.clone(),
            confidence: winner.confidence(),
            reasoning,
            matched_keywords: winner.matched_keywords.clone(),
        }
    }

    /// Scores for every department, in catalog order.
    pub fn score_departments(
        &self,
        title: &str,
        description: &str,
        category: &str,
        location: &str,
    ) -> Vec<DepartmentScore> {
        let content = format!("{title} {description} {category}").to_lowercase();
        let location_factor = self.catalog.location_factor(location);

        self.catalog
            .departments()
            .iter()
            .map(|department| {
                let (keyword_score, matched_keywords) = keyword_score(department, &content);
                DepartmentScore {
                    department_id: department.id.clone(),
                    score: keyword_score * department.urgency_multiplier * location_factor,
                    matched_keywords,
                }
            })
            .collect()
    }

    fn reasoning(
        &self,
        department: &Department,
        matched_keywords: &[String],
        location: &str,
    ) -> Vec<String> {
        let mut reasoning = Vec::new();

        if !matched_keywords.is_empty() {
            reasoning.push(format!("Matched keywords: {}", matched_keywords.join(", ")));
        }

        if department.urgency_multiplier > 1.0 {
            reasoning.push(format!(
                "High urgency department ({}x multiplier)",
                department.urgency_multiplier
            ));
        }

        for entry in self.catalog.matching_locations(location) {
            if entry.multiplier > 1.0 {
                reasoning.push(format!("Critical location: {} area", entry.keyword));
            }
        }

        if reasoning.is_empty() {
            reasoning.push(FALLBACK_REASON.to_string());
        }

        reasoning
    }
}

fn keyword_score(department: &Department, content: &str) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut matched = Vec::new();

    for matcher in department.keywords() {
        if matcher.is_match(content) {
            score += KEYWORD_HIT_POINTS;
            matched.push(matcher.keyword().to_string());
        }

        let occurrences = matcher.occurrences(content);
        if occurrences > 1 {
            score += REPEAT_MENTION_POINTS * (occurrences - 1) as f64;
        }
    }

    (score, matched)
}

fn confidence_from_score(score: f64) -> u8 {
    (score / CONFIDENCE_DIVISOR).min(100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped_and_rounded() {
        assert_eq!(confidence_from_score(0.0), 0);
        assert_eq!(confidence_from_score(86.4), 4);
        assert_eq!(confidence_from_score(50.0), 3);
        assert_eq!(confidence_from_score(10_000.0), 100);
    }
}
