//! Screening engine: deterministic keyword heuristic that scores a resume
//! against a job profile.
//!
//! The engine is stateless between calls. Everything it knows lives in the
//! `ScreeningTables` handed to `ScreeningEngine::new`, so a scoring run is a
//! pure function of `(resume_text, requirements, tables)`.
//!
//! `AppState` holds the engine as an `Arc<dyn Screener>`.

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::screening::models::{
    CandidateScore, EducationLevel, JobRequirements, Recommendation, ScoreBreakdown,
    SkillMatch, SkillRequirement,
};
use crate::screening::tables::{ScreeningTables, TablesError};
use crate::screening::text::{collapse_whitespace, normalize, ResumeText};

// ────────────────────────────────────────────────────────────────────────────
// Scoring constants
// ────────────────────────────────────────────────────────────────────────────

const SKILL_WEIGHT: f64 = 0.4;
const EXPERIENCE_WEIGHT: f64 = 0.3;
const CULTURAL_WEIGHT: f64 = 0.2;
const EDUCATION_WEIGHT: f64 = 0.1;

const MAX_SKILL_LEVEL: u32 = 10;
const MAX_EVIDENCE: usize = 3;
const EXPERT_BONUS: u32 = 3;
const SENIOR_BONUS: u32 = 2;
const EXPERIENCE_BONUS: u32 = 1;

/// Score for exactly meeting an experience or education requirement.
const MEETS_REQUIREMENT: f64 = 8.0;
const EXTRA_YEAR_CREDIT: f64 = 0.2;
const EDUCATION_SHORTFALL_SCALE: f64 = 6.0;

const MAX_POINTS_PER_VALUE: usize = 2;
const CULTURAL_SCALE: f64 = 2.0;
/// Cultural score of a pool with no stated values (every value fully matched).
const CULTURAL_FULL_MATCH: f64 = MAX_POINTS_PER_VALUE as f64 * CULTURAL_SCALE;

const RED_FLAG_PENALTY: f64 = 1.5;
const MAX_SCORE: f64 = 10.0;

const UNEMPLOYMENT_GAP_FLAG: &str = "Extended unemployment gap";
const TERMINATION_FLAG: &str = "Previous termination mentioned";

const HIGHLIGHT_RULES: &[(&[&str], &str)] = &[
    (&["achieved", "increased", "improved"], "Demonstrated achievements"),
    (&["award", "recognition", "honor"], "Awards and recognition"),
    (&["published", "patent", "research"], "Publications/Research"),
    (&["certification", "certified"], "Professional certifications"),
];

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores one resume against one job profile.
///
/// Implementations must be pure: identical inputs give identical output, and
/// calls may run concurrently from the batch worker pool.
pub trait Screener: Send + Sync {
    fn screen(&self, resume_text: &str, requirements: &JobRequirements) -> CandidateScore;

    /// Short label reported to callers ("keyword", ...).
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// ScreeningEngine: default keyword implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct ScreeningEngine {
    tables: ScreeningTables,
    experience_patterns: Vec<Regex>,
}

impl ScreeningEngine {
    /// Compiles the experience patterns. Each must carry a capture group for
    /// the year count.
    pub fn new(tables: ScreeningTables) -> Result<Self, TablesError> {
        let tables = tables.with_canonical_keys();
        let experience_patterns = tables
            .experience_patterns
            .iter()
            .map(|pattern| {
                let regex = Regex::new(pattern).map_err(|source| TablesError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                if regex.captures_len() < 2 {
                    return Err(TablesError::MissingCaptureGroup(pattern.clone()));
                }
                Ok(regex)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            tables,
            experience_patterns,
        })
    }

    pub fn screen_candidate(&self, resume_text: &str, requirements: &JobRequirements) -> CandidateScore {
        let text = ResumeText::new(resume_text);

        let (skill_match, skills) = self.score_skills(&text, &requirements.required_skills);

        let experience_years = self.extract_experience_years(&text);
        let experience_match = experience_score(experience_years, requirements.experience_years);

        let (cultural_fit, cultural_indicators) =
            self.score_cultural_fit(&text, &requirements.cultural_values);

        let education_level = self.infer_education(&text);
        let education_match = education_score(education_level, requirements.education_level);

        let red_flags = detect_red_flags(&text, &requirements.disqualifiers);
        let highlights = detect_highlights(&text);

        let total_score = composite_score(
            skill_match,
            experience_match,
            cultural_fit,
            education_match,
            red_flags.len(),
        );
        let recommendation = Recommendation::from_score(total_score, red_flags.len());

        debug!(
            total_score,
            skill_match,
            experience_match,
            cultural_fit,
            education_match,
            red_flags = red_flags.len(),
            ?recommendation,
            "Candidate screened"
        );

        CandidateScore {
            total_score,
            skill_match,
            experience_match,
            cultural_fit,
            education_match,
            breakdown: ScoreBreakdown {
                skills,
                experience_years,
                education_level,
                cultural_indicators,
                red_flags,
                highlights,
            },
            recommendation,
        }
    }

    /// Weighted mean of per-skill match scores. Negative or non-finite weights
    /// count as zero; a zero total weight scores 0.
    fn score_skills(&self, text: &ResumeText, required: &[SkillRequirement]) -> (f64, Vec<SkillMatch>) {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        let mut matches = Vec::with_capacity(required.len());

        for requirement in required {
            let skill_match = self.match_skill(text, requirement);
            let weight = if requirement.weight.is_finite() {
                requirement.weight.max(0.0)
            } else {
                0.0
            };
            weighted_sum += skill_match.match_score * weight;
            total_weight += weight;
            matches.push(skill_match);
        }

        let score = if total_weight > 0.0 {
            (weighted_sum / total_weight).clamp(0.0, MAX_SCORE)
        } else {
            0.0
        };
        (score, matches)
    }

    fn match_skill(&self, text: &ResumeText, requirement: &SkillRequirement) -> SkillMatch {
        let mut mentions = 0u32;
        let mut bonus = 0u32;
        let mut evidence = Vec::new();
        let mut seen = HashSet::new();

        for variant in self.tables.synonyms_for(&requirement.skill) {
            let key = normalize(&variant);
            if key.is_empty() || !seen.insert(key.clone()) {
                continue;
            }
            let count = text.count_phrase(&key);
            if count == 0 {
                continue;
            }
            mentions = mentions.saturating_add(u32::try_from(count).unwrap_or(u32::MAX));
            bonus += context_bonus(text, &key);
            if evidence.len() < MAX_EVIDENCE {
                evidence.push(collapse_whitespace(&variant.to_lowercase()));
            }
        }

        let candidate_level = mentions.saturating_add(bonus).min(MAX_SKILL_LEVEL);
        let match_score = if requirement.level <= 0 {
            MAX_SCORE
        } else {
            (f64::from(candidate_level) / f64::from(requirement.level)).min(1.0) * MAX_SCORE
        };

        SkillMatch {
            skill: requirement.skill.clone(),
            required_level: requirement.level,
            candidate_level,
            match_score,
            evidence,
        }
    }

    /// Largest year count captured by any experience pattern, 0 if none match.
    fn extract_experience_years(&self, text: &ResumeText) -> u32 {
        self.experience_patterns
            .iter()
            .flat_map(|pattern| pattern.captures_iter(text.lowered()))
            .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()))
            .max()
            .unwrap_or(0)
    }

    /// Up to 2 points per value, scaled by 2 over the value count. An empty
    /// value list scores `CULTURAL_FULL_MATCH` (4.0), not 0.
    fn score_cultural_fit(&self, text: &ResumeText, values: &[String]) -> (f64, Vec<String>) {
        if values.is_empty() {
            return (CULTURAL_FULL_MATCH, Vec::new());
        }

        let mut points = 0usize;
        let mut indicators = Vec::new();

        for value in values {
            let matched: Vec<String> = match self.tables.indicators_for(value) {
                Some(keywords) => keywords
                    .iter()
                    .filter(|keyword| text.contains_phrase(keyword))
                    .take(MAX_POINTS_PER_VALUE)
                    .cloned()
                    .collect(),
                None if text.contains_substring(value) => vec![value.trim().to_lowercase()],
                None => Vec::new(),
            };
            points += matched.len();
            indicators.extend(matched.into_iter().map(|keyword| format!("{}: {keyword}", value.trim())));
        }

        let score = (points as f64 / values.len() as f64 * CULTURAL_SCALE).min(MAX_SCORE);
        (score, indicators)
    }

    fn infer_education(&self, text: &ResumeText) -> EducationLevel {
        EducationLevel::DETECTION_ORDER
            .into_iter()
            .find(|&level| {
                self.tables
                    .education_keywords
                    .for_level(level)
                    .iter()
                    .any(|keyword| text.contains_phrase(keyword))
            })
            .unwrap_or(EducationLevel::HighSchool)
    }
}

impl Screener for ScreeningEngine {
    fn screen(&self, resume_text: &str, requirements: &JobRequirements) -> CandidateScore {
        self.screen_candidate(resume_text, requirements)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-score formulas
// ────────────────────────────────────────────────────────────────────────────

/// +3 expert, +2 senior/lead, +1 experience qualifiers around a matched keyword.
fn context_bonus(text: &ResumeText, keyword: &str) -> u32 {
    let mut bonus = 0;
    if text.contains_phrase(&format!("expert in {keyword}")) || text.contains_phrase(&format!("{keyword} expert")) {
        bonus += EXPERT_BONUS;
    }
    if text.contains_phrase(&format!("senior {keyword}")) || text.contains_phrase(&format!("lead {keyword}")) {
        bonus += SENIOR_BONUS;
    }
    if text.contains_phrase(&format!("experience with {keyword}"))
        || text.contains_phrase(&format!("{keyword} experience"))
    {
        bonus += EXPERIENCE_BONUS;
    }
    bonus
}

fn experience_score(candidate_years: u32, required_years: u32) -> f64 {
    if candidate_years >= required_years {
        let surplus = f64::from(candidate_years - required_years);
        (MEETS_REQUIREMENT + EXTRA_YEAR_CREDIT * surplus).min(MAX_SCORE)
    } else {
        // candidate < required, so required is at least 1 here.
        (f64::from(candidate_years) / f64::from(required_years) * MEETS_REQUIREMENT).max(0.0)
    }
}

fn education_score(candidate: EducationLevel, required: EducationLevel) -> f64 {
    let (ci, ri) = (candidate.index(), required.index());
    if ci >= ri {
        (MEETS_REQUIREMENT + f64::from(ci - ri)).min(MAX_SCORE)
    } else {
        // ci < ri, so ri is at least 1 here.
        (f64::from(ci) / f64::from(ri) * EDUCATION_SHORTFALL_SCALE).max(0.0)
    }
}

fn detect_red_flags(text: &ResumeText, disqualifiers: &[String]) -> Vec<String> {
    let mut flags = Vec::new();
    let mut seen = HashSet::new();

    for phrase in disqualifiers {
        let phrase = phrase.trim();
        if phrase.is_empty() || !seen.insert(collapse_whitespace(&phrase.to_lowercase())) {
            continue;
        }
        if text.contains_substring(phrase) {
            flags.push(phrase.to_string());
        }
    }

    if text.contains_substring("currently unemployed for") && text.contains_substring("years") {
        flags.push(UNEMPLOYMENT_GAP_FLAG.to_string());
    }
    if text.contains_substring("fired") || text.contains_substring("terminated") {
        flags.push(TERMINATION_FLAG.to_string());
    }
    flags
}

fn detect_highlights(text: &ResumeText) -> Vec<String> {
    HIGHLIGHT_RULES
        .iter()
        .filter(|(triggers, _)| triggers.iter().any(|t| text.contains_substring(t)))
        .map(|(_, label)| label.to_string())
        .collect()
}

/// Weighted composite minus the red-flag penalty, kept in [0, 10] and
/// rounded to one decimal.
fn composite_score(skill: f64, experience: f64, cultural: f64, education: f64, red_flags: usize) -> f64 {
    let raw = skill * SKILL_WEIGHT
        + experience * EXPERIENCE_WEIGHT
        + cultural * CULTURAL_WEIGHT
        + education * EDUCATION_WEIGHT;
    let adjusted = (raw - RED_FLAG_PENALTY * red_flags as f64).clamp(0.0, MAX_SCORE);
    (adjusted * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
