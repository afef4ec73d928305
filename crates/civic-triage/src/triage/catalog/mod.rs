//! Read-only rule tables that drive every routing and scoring decision.
//!
//! A [`Catalog`] is built once from a [`CatalogDefinition`] (the built-in municipal set or a
//! JSON file) and then shared behind an `Arc`. Construction validates the tables and compiles
//! one whole-word matcher per department keyword, so classification never builds patterns.

mod standard;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::warn;

pub use standard::standard_definition;

pub const DEFAULT_PRIORITY_SCORE: f64 = 30.0;
pub const DEFAULT_CATEGORY_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_RESOLUTION_HOURS: u32 = 24;
pub const FALLBACK_CASEWORKER: &str = "System Administrator";

/// Serializable description of a department entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub urgency_multiplier: f64,
}

/// Substring keyword paired with the factor applied when it appears in a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMultiplier {
    pub keyword: String,
    pub multiplier: f64,
}

/// Every table the engine reads, in a shape that round-trips through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDefinition {
    pub departments: Vec<DepartmentDefinition>,
    #[serde(default)]
    pub location_multipliers: Vec<LocationMultiplier>,
    #[serde(default)]
    pub priority_base_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub category_multipliers: BTreeMap<String, f64>,
    #[serde(default)]
    pub officer_pools: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub resolution_hours: BTreeMap<String, BTreeMap<String, u32>>,
    #[serde(default = "standard::urgent_keywords")]
    pub urgent_keywords: Vec<String>,
}

/// Keyword compiled into a case-insensitive whole-word pattern.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    pattern: Regex,
}

impl KeywordMatcher {
    pub fn new(keyword: &str) -> Result<Self, CatalogError> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(CatalogError::EmptyKeyword);
        }

        let pattern = Regex::new(&whole_word_pattern(&keyword)).map_err(|source| {
            CatalogError::InvalidKeyword {
                keyword: keyword.clone(),
                source,
            }
        })?;

        Ok(Self { keyword, pattern })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Whole-word, case-insensitive hit anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Non-overlapping substring occurrences in already-lowercased text.
    pub fn occurrences(&self, lowered_text: &str) -> usize {
        lowered_text.matches(self.keyword.as_str()).count()
    }
}

/// `\b` only holds next to a word character, so punctuation at either end of the
/// keyword is guarded by a non-word character or the text boundary instead.
fn whole_word_pattern(keyword: &str) -> String {
    let starts_with_word = keyword.chars().next().is_some_and(is_word_char);
    let ends_with_word = keyword.chars().last().is_some_and(is_word_char);
    format!(
        r"(?i){}{}{}",
        if starts_with_word { r"\b" } else { r"(?:^|\W)" },
        regex::escape(keyword),
        if ends_with_word { r"\b" } else { r"(?:$|\W)" },
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Department with its keyword matchers compiled.
#[derive(Debug, Clone)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub description: String,
    pub urgency_multiplier: f64,
    keywords: Vec<KeywordMatcher>,
}

impl Department {
    pub fn keywords(&self) -> &[KeywordMatcher] {
        &self.keywords
    }
}

/// Validated, immutable rule set.
#[derive(Debug, Clone)]
pub struct Catalog {
    departments: Vec<Department>,
    location_multipliers: Vec<LocationMultiplier>,
    priority_base_scores: BTreeMap<String, f64>,
    category_multipliers: BTreeMap<String, f64>,
    officer_pools: BTreeMap<String, Vec<String>>,
    fallback_pool: Vec<String>,
    resolution_hours: BTreeMap<String, BTreeMap<String, u32>>,
    urgent_keywords: Vec<String>,
    definition: CatalogDefinition,
}

impl Catalog {
    /// The municipal rule set shipped with the engine.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_definition(standard_definition())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let definition: CatalogDefinition = serde_json::from_reader(reader)?;
        Self::from_definition(definition)
    }

    pub fn from_definition(definition: CatalogDefinition) -> Result<Self, CatalogError> {
        if definition.departments.is_empty() {
            return Err(CatalogError::NoDepartments);
        }

        let mut seen = HashSet::new();
        let mut departments = Vec::with_capacity(definition.departments.len());
        for entry in &definition.departments {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateDepartment(entry.id.clone()));
            }
            if !entry.urgency_multiplier.is_finite() || entry.urgency_multiplier < 1.0 {
                return Err(CatalogError::InvalidUrgencyMultiplier {
                    department: entry.id.clone(),
                    value: entry.urgency_multiplier,
                });
            }

            let keywords = entry
                .keywords
                .iter()
                .map(|keyword| KeywordMatcher::new(keyword))
                .collect::<Result<Vec<_>, _>>()?;
            if keywords.is_empty() {
                warn!(
                    department = %entry.id,
                    "department has no keywords; it can only win classification ties"
                );
            }

            departments.push(Department {
                id: entry.id.clone(),
                name: entry.name.clone(),
                description: entry.description.clone(),
                urgency_multiplier: entry.urgency_multiplier,
                keywords,
            });
        }

        let mut location_multipliers = Vec::with_capacity(definition.location_multipliers.len());
        for entry in &definition.location_multipliers {
            let keyword = entry.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(CatalogError::EmptyKeyword);
            }
            ensure_factor(&keyword, entry.multiplier)?;
            location_multipliers.push(LocationMultiplier {
                keyword,
                multiplier: entry.multiplier,
            });
        }

        for (key, factor) in definition
            .category_multipliers
            .iter()
            .chain(definition.priority_base_scores.iter())
        {
            ensure_factor(key, *factor)?;
        }

        if let Some((department, _)) = definition
            .officer_pools
            .iter()
            .find(|(_, pool)| pool.is_empty())
        {
            return Err(CatalogError::EmptyOfficerPool(department.clone()));
        }

        let urgent_keywords = definition
            .urgent_keywords
            .iter()
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();

        Ok(Self {
            departments,
            location_multipliers,
            priority_base_scores: definition.priority_base_scores.clone(),
            category_multipliers: definition.category_multipliers.clone(),
            officer_pools: definition.officer_pools.clone(),
            fallback_pool: vec![FALLBACK_CASEWORKER.to_string()],
            resolution_hours: definition.resolution_hours.clone(),
            urgent_keywords,
            definition,
        })
    }

    /// Departments in catalog order; the order breaks classification ties.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|department| department.id == id)
    }

    pub fn location_multipliers(&self) -> &[LocationMultiplier] {
        &self.location_multipliers
    }

    /// Location entries whose keyword occurs in `location`, in catalog order.
    pub fn matching_locations<'a>(
        &'a self,
        location: &str,
    ) -> impl Iterator<Item = &'a LocationMultiplier> + 'a {
        let lowered = location.to_lowercase();
        self.location_multipliers
            .iter()
            .filter(move |entry| lowered.contains(entry.keyword.as_str()))
    }

    /// Product of every matching location multiplier (1.0 when none match).
    pub fn location_factor(&self, location: &str) -> f64 {
        self.matching_locations(location)
            .map(|entry| entry.multiplier)
            .product()
    }

    pub fn priority_base_score(&self, priority: &str) -> f64 {
        self.priority_base_scores
            .get(priority)
            .copied()
            .unwrap_or(DEFAULT_PRIORITY_SCORE)
    }

    pub fn category_multiplier(&self, category: &str) -> f64 {
        self.category_multipliers
            .get(category)
            .copied()
            .unwrap_or(DEFAULT_CATEGORY_MULTIPLIER)
    }

    /// Caseworkers for a department; never empty.
    pub fn officer_pool(&self, department_id: &str) -> &[String] {
        self.officer_pools
            .get(department_id)
            .map(Vec::as_slice)
            .unwrap_or(self.fallback_pool.as_slice())
    }

    /// Whether `department_id` has its own pool rather than the fallback.
    pub fn has_officer_pool(&self, department_id: &str) -> bool {
        self.officer_pools.contains_key(department_id)
    }

    /// Missing and zero-hour cells both fall back to the default window.
    pub fn resolution_hours(&self, department_id: &str, priority: &str) -> u32 {
        self.resolution_hours
            .get(department_id)
            .and_then(|row| row.get(priority))
            .copied()
            .filter(|hours| *hours > 0)
            .unwrap_or(DEFAULT_RESOLUTION_HOURS)
    }

    pub fn urgent_keywords(&self) -> &[String] {
        &self.urgent_keywords
    }

    /// The definition this catalog was compiled from.
    pub fn definition(&self) -> &CatalogDefinition {
        &self.definition
    }
}

fn ensure_factor(key: &str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidFactor {
            key: key.to_string(),
            value,
        })
    }
}

/// Reasons a rule set is rejected at load time.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog must define at least one department")]
    NoDepartments,
    #[error("department '{0}' is defined more than once")]
    DuplicateDepartment(String),
    #[error("department '{department}' has urgency multiplier {value}; expected a finite value >= 1.0")]
    InvalidUrgencyMultiplier { department: String, value: f64 },
    #[error("table entry '{key}' has invalid factor {value}")]
    InvalidFactor { key: String, value: f64 },
    #[error("officer pool for '{0}' is empty")]
    EmptyOfficerPool(String),
    #[error("keywords must not be blank")]
    EmptyKeyword,
    #[error("keyword '{keyword}' could not be compiled: {source}")]
    InvalidKeyword {
        keyword: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_definition() -> CatalogDefinition {
        CatalogDefinition {
            departments: vec![DepartmentDefinition {
                id: "roads".to_string(),
                name: "Roads".to_string(),
                description: "Road surface repairs".to_string(),
                keywords: vec!["pothole".to_string()],
                urgency_multiplier: 1.0,
            }],
            location_multipliers: Vec::new(),
            priority_base_scores: BTreeMap::new(),
            category_multipliers: BTreeMap::new(),
            officer_pools: BTreeMap::new(),
            resolution_hours: BTreeMap::new(),
            urgent_keywords: Vec::new(),
        }
    }

    #[test]
    fn standard_catalog_compiles() {
        let catalog = Catalog::standard().expect("standard catalog is valid");
        assert_eq!(catalog.departments().len(), 9);
        assert_eq!(catalog.departments()[0].id, "water-utilities");
        assert_eq!(catalog.location_multipliers().len(), 8);
        assert_eq!(catalog.urgent_keywords().len(), 8);
    }

    #[test]
    fn lookups_fall_back_to_defaults() {
        let catalog = Catalog::standard().expect("standard catalog");
        assert_eq!(catalog.priority_base_score("critical"), 90.0);
        assert_eq!(catalog.priority_base_score("whenever"), DEFAULT_PRIORITY_SCORE);
        assert_eq!(catalog.category_multiplier("utilities"), 1.4);
        assert_eq!(catalog.category_multiplier("potholes"), 1.0);
        assert_eq!(catalog.officer_pool("unknown-dept"), ["System Administrator"]);
        assert_eq!(catalog.resolution_hours("unknown-dept", "critical"), 24);
        assert_eq!(catalog.resolution_hours("public-safety", "critical"), 1);
    }

    #[test]
    fn location_factor_compounds_every_match() {
        let catalog = Catalog::standard().expect("standard catalog");
        let factor = catalog.location_factor("Downtown Hospital Plaza");
        assert!((factor - 2.0 * 1.4).abs() < 1e-9);
        assert_eq!(catalog.location_factor("Riverside"), 1.0);
        assert_eq!(catalog.location_factor(""), 1.0);
    }

    #[test]
    fn keyword_matcher_requires_whole_words() {
        let matcher = KeywordMatcher::new("Main").expect("compiles");
        assert_eq!(matcher.keyword(), "main");
        assert!(matcher.is_match("water MAIN burst"));
        assert!(!matcher.is_match("maintenance crew"));
        assert_eq!(matcher.occurrences("main road and maintenance"), 2);
    }

    #[test]
    fn keyword_matcher_escapes_pattern_characters() {
        let matcher = KeywordMatcher::new("c++").expect("escaped keyword compiles");
        assert_eq!(matcher.occurrences("c++ and c++"), 2);
        assert!(KeywordMatcher::new("  ").is_err());
    }

    #[test]
    fn keyword_matcher_handles_punctuation_at_either_end() {
        let trailing = KeywordMatcher::new("c++").expect("compiles");
        assert!(trailing.is_match("learn c++ now"));
        assert!(trailing.is_match("c++"));
        assert!(!trailing.is_match("abc++ now"));
        assert!(!trailing.is_match("c++x"));

        let leading = KeywordMatcher::new(".net").expect("compiles");
        assert!(leading.is_match("the .net outage"));
        assert!(!leading.is_match("the .network outage"));

        let inner = KeywordMatcher::new("e-coli").expect("compiles");
        assert!(inner.is_match("e-coli found"));
    }

    #[test]
    fn zero_hour_cells_use_the_default_window() {
        let mut definition = minimal_definition();
        definition.resolution_hours.insert(
            "roads".to_string(),
            BTreeMap::from([("high".to_string(), 0), ("low".to_string(), 6)]),
        );
        let catalog = Catalog::from_definition(definition).expect("catalog builds");

        assert_eq!(catalog.resolution_hours("roads", "high"), DEFAULT_RESOLUTION_HOURS);
        assert_eq!(catalog.resolution_hours("roads", "low"), 6);
    }

    #[test]
    fn departments_without_keywords_are_still_loaded() {
        let mut definition = minimal_definition();
        definition.departments.push(DepartmentDefinition {
            id: "general".to_string(),
            name: "General".to_string(),
            description: String::new(),
            keywords: Vec::new(),
            urgency_multiplier: 1.0,
        });

        let catalog = Catalog::from_definition(definition).expect("catalog builds");

        let general = catalog.department("general").expect("general department");
        assert!(general.keywords().is_empty());
        assert!(!catalog.has_officer_pool("general"));
    }

    #[test]
    fn rejects_duplicate_departments() {
        let mut definition = minimal_definition();
        definition.departments.push(definition.departments[0].clone());
        let err = Catalog::from_definition(definition).expect_err("duplicate rejected");
        assert!(matches!(err, CatalogError::DuplicateDepartment(id) if id == "roads"));
    }

    #[test]
    fn rejects_urgency_multiplier_below_one() {
        let mut definition = minimal_definition();
        definition.departments[0].urgency_multiplier = 0.5;
        let err = Catalog::from_definition(definition).expect_err("multiplier rejected");
        assert!(matches!(err, CatalogError::InvalidUrgencyMultiplier { .. }));
    }

    #[test]
    fn rejects_empty_officer_pool_and_empty_catalog() {
        let mut definition = minimal_definition();
        definition
            .officer_pools
            .insert("roads".to_string(), Vec::new());
        assert!(matches!(
            Catalog::from_definition(definition),
            Err(CatalogError::EmptyOfficerPool(_))
        ));

        let mut definition = minimal_definition();
        definition.departments.clear();
        assert!(matches!(
            Catalog::from_definition(definition),
            Err(CatalogError::NoDepartments)
        ));
    }

    #[test]
    fn loads_from_json_with_default_urgent_keywords() {
        let json = r#"{
            "departments": [
                {"id": "roads", "name": "Roads", "description": "", "keywords": ["pothole"], "urgency_multiplier": 1.2}
            ],
            "location_multipliers": [{"keyword": "School", "multiplier": 1.8}]
        }"#;
        let catalog = Catalog::from_json_reader(json.as_bytes()).expect("json catalog loads");
        assert_eq!(catalog.departments().len(), 1);
        assert_eq!(catalog.location_multipliers()[0].keyword, "school");
        assert!(catalog.urgent_keywords().iter().any(|kw| kw == "flooding"));
    }

    #[test]
    fn standard_definition_round_trips_through_json() {
        let catalog = Catalog::standard().expect("standard catalog");
        let json = serde_json::to_string(catalog.definition()).expect("serialize");
        let reloaded = Catalog::from_json_reader(json.as_bytes()).expect("reload");
        assert_eq!(reloaded.definition(), catalog.definition());
    }
}
