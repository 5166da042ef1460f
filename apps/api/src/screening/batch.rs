//! Batch screening: scores a candidate pool in parallel and ranks it.

use rayon::prelude::*;
use tracing::info;

use crate::screening::engine::Screener;
use crate::screening::models::{CandidateInput, JobRequirements, ScreeningResult};

/// Scores every candidate independently and returns the results sorted by
/// `total_score`, highest first. Ties keep their input order.
pub fn batch_screen<S: Screener + ?Sized>(
    screener: &S,
    candidates: &[CandidateInput],
    requirements: &JobRequirements,
) -> Vec<ScreeningResult> {
    // `collect` on an indexed parallel iterator keeps input order, which the
    // stable sort below relies on for ties.
    let mut results: Vec<ScreeningResult> = candidates
        .par_iter()
        .map(|candidate| ScreeningResult {
            candidate_id: candidate.id.clone(),
            score: screener.screen(&candidate.resume, requirements),
        })
        .collect();

    results.sort_by(|a, b| b.score.total_score.total_cmp(&a.score.total_score));

    info!(
        candidates = results.len(),
        backend = screener.backend(),
        "Batch screening complete"
    );
    results
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::screening::engine::ScreeningEngine;
    use crate::screening::models::{
        CandidateScore, EducationLevel, Recommendation, ScoreBreakdown, SkillRequirement,
    };
    use crate::screening::tables::ScreeningTables;

    /// Scores a resume as the number written in it, for ordering tests.
    pub(crate) struct FixedScreener;

    pub(crate) fn fixed_score(total_score: f64) -> CandidateScore {
        CandidateScore {
            total_score,
            skill_match: 0.0,
            experience_match: 0.0,
            cultural_fit: 0.0,
            education_match: 0.0,
            breakdown: ScoreBreakdown::default(),
            recommendation: Recommendation::from_score(total_score, 0),
        }
    }

    impl Screener for FixedScreener {
        fn screen(&self, resume_text: &str, _requirements: &JobRequirements) -> CandidateScore {
            fixed_score(resume_text.trim().parse().unwrap_or(0.0))
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    fn candidate(id: &str, resume: &str) -> CandidateInput {
        CandidateInput {
            id: id.to_string(),
            resume: resume.to_string(),
        }
    }

    #[test]
    fn test_results_sorted_descending() {
        let pool = vec![
            candidate("a", "3.5"),
            candidate("b", "9.1"),
            candidate("c", "0"),
            candidate("d", "7.2"),
        ];
        let results = batch_screen(&FixedScreener, &pool, &JobRequirements::default());
        let ids: Vec<_> = results.iter().map(|r| r.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let pool: Vec<_> = (0..64)
            .map(|i| candidate(&format!("c{i}"), if i % 2 == 0 { "5.0" } else { "6.0" }))
            .collect();
        let results = batch_screen(&FixedScreener, &pool, &JobRequirements::default());

        let expected: Vec<String> = (0..64)
            .filter(|i| i % 2 == 1)
            .chain((0..64).filter(|i| i % 2 == 0))
            .map(|i| format!("c{i}"))
            .collect();
        let ids: Vec<String> = results.into_iter().map(|r| r.candidate_id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_empty_pool() {
        let results = batch_screen(&FixedScreener, &[], &JobRequirements::default());
        assert!(results.is_empty());
    }

    #[test]
    fn test_batch_matches_individual_screening() {
        let engine = ScreeningEngine::new(ScreeningTables::default()).unwrap();
        let requirements = JobRequirements {
            required_skills: vec![SkillRequirement {
                skill: "python".to_string(),
                level: 4,
                weight: 1.0,
            }],
            experience_years: 3,
            education_level: EducationLevel::Bachelor,
            cultural_values: vec!["growth_mindset".to_string()],
            disqualifiers: vec![],
        };
        let pool = vec![
            candidate("junior", "Python bootcamp, always learning"),
            candidate("senior", "Senior Python engineer, python expert, 8 years experience, BSc"),
            candidate("other", "Retail manager"),
        ];

        let results = batch_screen(&engine, &pool, &requirements);
        assert_eq!(results[0].candidate_id, "senior");
        for result in &results {
            let resume = &pool.iter().find(|c| c.id == result.candidate_id).unwrap().resume;
            assert_eq!(result.score, engine.screen_candidate(resume, &requirements));
        }
        assert!(results
            .windows(2)
            .all(|w| w[0].score.total_score >= w[1].score.total_score));
    }
}
