//! Screening tables: keyword, synonym and pattern configuration for the engine.
//!
//! Tables are plain data. They are built once at startup (either the built-in
//! defaults or a JSON file) and handed to `ScreeningEngine::new`, which never
//! mutates them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::screening::models::EducationLevel;
use crate::screening::text::normalize;

#[derive(Debug, Error)]
pub enum TablesError {
    #[error("Failed to read screening tables from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid screening tables JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid experience pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Experience pattern '{0}' has no capture group for the year count")]
    MissingCaptureGroup(String),
}

/// Keywords that signal each education level above high school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationKeywords {
    pub phd: Vec<String>,
    pub master: Vec<String>,
    pub bachelor: Vec<String>,
    pub associate: Vec<String>,
}

impl EducationKeywords {
    pub fn for_level(&self, level: EducationLevel) -> &[String] {
        match level {
            EducationLevel::Phd => &self.phd,
            EducationLevel::Master => &self.master,
            EducationLevel::Bachelor => &self.bachelor,
            EducationLevel::Associate => &self.associate,
            EducationLevel::HighSchool => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningTables {
    /// Canonical skill name → textual variants.
    pub skill_synonyms: BTreeMap<String, Vec<String>>,
    /// Regexes with one capture group holding a year count.
    pub experience_patterns: Vec<String>,
    /// Cultural value tag → indicator keywords.
    pub cultural_indicators: BTreeMap<String, Vec<String>>,
    pub education_keywords: EducationKeywords,
}

impl ScreeningTables {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TablesError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TablesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TablesError> {
        let tables: Self = serde_json::from_str(raw)?;
        Ok(tables.with_canonical_keys())
    }

    /// Rewrites `skill_synonyms` and `cultural_indicators` keys into
    /// `table_key` form. Keys that collide after rewriting merge their lists.
    pub fn with_canonical_keys(mut self) -> Self {
        self.skill_synonyms = canonicalize(std::mem::take(&mut self.skill_synonyms));
        self.cultural_indicators = canonicalize(std::mem::take(&mut self.cultural_indicators));
        self
    }

    /// Variants for a skill; unknown skills fall back to the skill name itself.
    pub fn synonyms_for(&self, skill: &str) -> Vec<String> {
        match self.skill_synonyms.get(&table_key(skill)) {
            Some(variants) if !variants.is_empty() => variants.clone(),
            _ => vec![skill.trim().to_lowercase()],
        }
    }

    /// Indicator keywords for a value tag, or `None` for a custom tag.
    pub fn indicators_for(&self, value: &str) -> Option<&[String]> {
        self.cultural_indicators.get(&table_key(value)).map(Vec::as_slice)
    }
}

/// Lookup form of a skill or value name: normalized, words joined by `_`.
/// `"Machine-Learning"`, `"machine learning"` and `"machine_learning"` all
/// map to `machine_learning`.
pub fn table_key(name: &str) -> String {
    normalize(name).replace(' ', "_")
}

fn canonicalize(table: BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    let mut canonical: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, words) in table {
        let merged = canonical.entry(table_key(&key)).or_default();
        for word in words {
            if !merged.contains(&word) {
                merged.push(word);
            }
        }
    }
    canonical
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for ScreeningTables {
    fn default() -> Self {
        let skill_synonyms: BTreeMap<String, Vec<String>> = [
            (
                "javascript",
                &["javascript", "js", "node.js", "react", "vue", "angular", "typescript"][..],
            ),
            ("typescript", &["typescript", "ts"][..]),
            ("python", &["python", "django", "flask", "fastapi", "pandas", "numpy"][..]),
            ("java", &["java", "spring", "spring boot", "hibernate", "jvm"][..]),
            ("rust", &["rust", "tokio", "cargo"][..]),
            ("go", &["golang", "go"][..]),
            ("sql", &["sql", "postgresql", "postgres", "mysql", "sqlite", "oracle"][..]),
            ("aws", &["aws", "amazon web services", "ec2", "s3", "lambda", "cloudformation"][..]),
            ("cloud", &["cloud", "aws", "azure", "gcp", "google cloud"][..]),
            ("devops", &["devops", "docker", "kubernetes", "terraform", "ci cd", "jenkins"][..]),
            (
                "machine_learning",
                &["machine learning", "ml", "deep learning", "tensorflow", "pytorch", "scikit learn"][..],
            ),
            ("data_analysis", &["data analysis", "analytics", "excel", "tableau", "power bi", "statistics"][..]),
            (
                "project_management",
                &["project management", "agile", "scrum", "kanban", "pmp", "jira"][..],
            ),
            ("leadership", &["leadership", "led", "managed", "mentored", "supervised"][..]),
            ("communication", &["communication", "presented", "presentation", "stakeholder", "writing"][..]),
            ("nursing", &["nursing", "rn", "registered nurse", "patient care", "bls", "acls"][..]),
            ("sales", &["sales", "quota", "pipeline", "crm", "salesforce", "business development"][..]),
            ("recruiting", &["recruiting", "recruitment", "sourcing", "talent acquisition", "ats"][..]),
        ]
        .into_iter()
        .map(|(skill, variants)| (skill.to_string(), owned(variants)))
        .collect();

        let experience_patterns = owned(&[
            r"(\d+)\+?\s*(?:years?|yrs?)\s+(?:of\s+)?(?:professional\s+|industry\s+|relevant\s+|work\s+)?experience",
            r"experience\s+of\s+(\d+)\+?\s*(?:years?|yrs?)",
            r"worked\s+(?:for\s+)?(\d+)\+?\s*(?:years?|yrs?)",
            r"(\d+)\+?\s*(?:years?|yrs?)\s+(?:working|in\s+the\s+industry)",
        ]);

        let cultural_indicators: BTreeMap<String, Vec<String>> = [
            (
                "collaboration",
                &["team", "collaborate", "collaborated", "collaboration", "cross functional", "partnered"][..],
            ),
            ("innovation", &["innovative", "innovation", "creative", "pioneered", "invented", "new ideas"][..]),
            (
                "growth_mindset",
                &["learning", "growth", "curious", "mentorship", "feedback", "self taught"][..],
            ),
            (
                "ownership",
                &["ownership", "owned", "accountable", "responsible for", "initiative", "end to end"][..],
            ),
        ]
        .into_iter()
        .map(|(value, words)| (value.to_string(), owned(words)))
        .collect();

        let education_keywords = EducationKeywords {
            phd: owned(&["phd", "ph d", "doctorate", "doctoral"]),
            master: owned(&["master", "masters", "msc", "m sc", "mba", "m s"]),
            bachelor: owned(&["bachelor", "bachelors", "bsc", "b sc", "b s", "b a", "undergraduate degree"]),
            associate: owned(&["associate degree", "associates degree", "associate of", "a a s"]),
        };

        Self {
            skill_synonyms,
            experience_patterns,
            cultural_indicators,
            education_keywords,
        }
    }
}
