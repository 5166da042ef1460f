//! Request validation for the screening endpoints.
//!
//! The engine itself accepts anything; these checks reject requests a caller
//! almost certainly did not mean to send, and report every problem at once.

use std::collections::HashSet;

use tracing::warn;

use crate::errors::AppError;
use crate::screening::models::{CandidateInput, JobRequirements};

const MIN_SKILL_LEVEL: i32 = 1;
const MAX_SKILL_LEVEL: i32 = 10;

pub fn validate_requirements(requirements: &JobRequirements) -> Vec<String> {
    let mut issues = Vec::new();

    for (i, skill) in requirements.required_skills.iter().enumerate() {
        if skill.skill.trim().is_empty() {
            issues.push(format!("required_skills[{i}].skill cannot be empty"));
        }
        if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&skill.level) {
            issues.push(format!(
                "required_skills[{i}].level must be between {MIN_SKILL_LEVEL} and {MAX_SKILL_LEVEL}, got {}",
                skill.level
            ));
        }
        if !skill.weight.is_finite() || skill.weight <= 0.0 {
            issues.push(format!("required_skills[{i}].weight must be a positive number"));
        }
    }

    issues
}

pub fn validate_screen_request(resume_text: &str, requirements: &JobRequirements) -> Vec<String> {
    let mut issues = Vec::new();
    if resume_text.trim().is_empty() {
        issues.push("resume_text cannot be empty".to_string());
    }
    issues.extend(validate_requirements(requirements));
    issues
}

pub fn validate_batch_request(
    candidates: &[CandidateInput],
    requirements: &JobRequirements,
    max_batch_size: usize,
) -> Vec<String> {
    let mut issues = Vec::new();

    if candidates.is_empty() {
        issues.push("candidates cannot be empty".to_string());
    }
    if candidates.len() > max_batch_size {
        issues.push(format!(
            "batch of {} candidates exceeds the limit of {max_batch_size}",
            candidates.len()
        ));
    }

    let mut seen = HashSet::new();
    for (i, candidate) in candidates.iter().enumerate() {
        let id = candidate.id.trim();
        if id.is_empty() {
            issues.push(format!("candidates[{i}].id cannot be empty"));
        } else if !seen.insert(id) {
            issues.push(format!("duplicate candidate id '{id}'"));
        }
        if candidate.resume.trim().is_empty() {
            issues.push(format!("candidates[{i}].resume cannot be empty"));
        }
    }

    issues.extend(validate_requirements(requirements));
    issues
}

/// Turns collected issues into a single `AppError::Validation`.
pub fn ensure_valid(issues: Vec<String>) -> Result<(), AppError> {
    if issues.is_empty() {
        return Ok(());
    }
    warn!(issues = issues.len(), "Rejected screening request");
    Err(AppError::Validation(issues.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::models::SkillRequirement;

    fn requirements(level: i32, weight: f64) -> JobRequirements {
        JobRequirements {
            required_skills: vec![SkillRequirement {
                skill: "rust".to_string(),
                level,
                weight,
            }],
            ..JobRequirements::default()
        }
    }

    fn candidate(id: &str, resume: &str) -> CandidateInput {
        CandidateInput {
            id: id.to_string(),
            resume: resume.to_string(),
        }
    }

    #[test]
    fn test_valid_requirements_pass() {
        assert!(validate_requirements(&requirements(5, 1.0)).is_empty());
        assert!(validate_requirements(&JobRequirements::default()).is_empty());
    }

    #[test]
    fn test_level_out_of_range() {
        let issues = validate_requirements(&requirements(11, 1.0));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("level must be between 1 and 10"));
        assert_eq!(validate_requirements(&requirements(0, 1.0)).len(), 1);
    }

    #[test]
    fn test_non_positive_weight() {
        assert_eq!(validate_requirements(&requirements(5, 0.0)).len(), 1);
        assert_eq!(validate_requirements(&requirements(5, -1.0)).len(), 1);
        assert_eq!(validate_requirements(&requirements(5, f64::NAN)).len(), 1);
    }

    #[test]
    fn test_blank_resume_rejected() {
        let issues = validate_screen_request("   ", &JobRequirements::default());
        assert_eq!(issues, vec!["resume_text cannot be empty".to_string()]);
    }

    #[test]
    fn test_batch_collects_all_issues() {
        let pool = vec![candidate("a", "text"), candidate("a", ""), candidate(" ", "text")];
        let issues = validate_batch_request(&pool, &requirements(5, 1.0), 2);
        assert!(issues.iter().any(|i| i.contains("exceeds the limit of 2")));
        assert!(issues.iter().any(|i| i == "duplicate candidate id 'a'"));
        assert!(issues.iter().any(|i| i == "candidates[1].resume cannot be empty"));
        assert!(issues.iter().any(|i| i == "candidates[2].id cannot be empty"));
    }

    #[test]
    fn test_empty_batch_rejected() {
        let issues = validate_batch_request(&[], &JobRequirements::default(), 10);
        assert_eq!(issues, vec!["candidates cannot be empty".to_string()]);
    }

    #[test]
    fn test_ensure_valid() {
        assert!(ensure_valid(vec![]).is_ok());
        let err = ensure_valid(vec!["a".to_string(), "b".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "a; b"));
    }
}
