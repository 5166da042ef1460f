//! Screening report: aggregate view over a ranked candidate pool.

use serde::{Deserialize, Serialize};

use crate::screening::models::{Recommendation, ScreeningResult};

const TOP_CANDIDATE_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_candidates: usize,
    pub strong_hire: usize,
    pub hire: usize,
    pub maybe: usize,
    pub no_hire: usize,
    /// Mean `total_score`; 0 for an empty pool.
    pub avg_score: f64,
}

impl ReportSummary {
    pub fn recommended(&self) -> usize {
        self.strong_hire + self.hire
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub summary: ReportSummary,
    pub top_candidates: Vec<ScreeningResult>,
    pub insights: Vec<String>,
}

/// Builds the report from `batch_screen` output. `top_candidates` keeps the
/// order of `results`, so pass them already ranked.
pub fn generate_screening_report(results: &[ScreeningResult]) -> ScreeningReport {
    let summary = summarize(results);

    let top_candidates = results
        .iter()
        .filter(|r| r.score.recommendation.is_hire())
        .take(TOP_CANDIDATE_LIMIT)
        .cloned()
        .collect();

    let insights = build_insights(&summary);

    ScreeningReport {
        summary,
        top_candidates,
        insights,
    }
}

fn summarize(results: &[ScreeningResult]) -> ReportSummary {
    let mut summary = ReportSummary {
        total_candidates: results.len(),
        ..ReportSummary::default()
    };

    for result in results {
        match result.score.recommendation {
            Recommendation::StrongHire => summary.strong_hire += 1,
            Recommendation::Hire => summary.hire += 1,
            Recommendation::Maybe => summary.maybe += 1,
            Recommendation::NoHire => summary.no_hire += 1,
        }
    }

    if !results.is_empty() {
        let total: f64 = results.iter().map(|r| r.score.total_score).sum();
        summary.avg_score = total / results.len() as f64;
    }
    summary
}

/// Human-readable observations derived from the summary alone.
pub fn build_insights(summary: &ReportSummary) -> Vec<String> {
    let total = summary.total_candidates;
    if total == 0 {
        return vec!["No candidates were screened.".to_string()];
    }

    let recommended = summary.recommended();
    let recommended_pct = recommended as f64 / total as f64 * 100.0;

    let mut insights = vec![
        format!(
            "{total} candidate(s) screened with an average score of {:.1}/10.",
            summary.avg_score
        ),
        format!("{recommended_pct:.0}% of candidates ({recommended} of {total}) are recommended for hire."),
    ];

    if summary.strong_hire > 0 {
        insights.push(format!(
            "{} strong hire candidate(s) identified; prioritize them for interviews.",
            summary.strong_hire
        ));
    }
    if summary.maybe > 0 {
        insights.push(format!(
            "{} borderline candidate(s) may warrant a manual review.",
            summary.maybe
        ));
    }
    if recommended == 0 {
        insights.push("No candidate met the hiring bar.".to_string());
    }
    if summary.no_hire * 2 > total {
        insights.push(
            "Over half of the pool falls below the hiring bar; consider revisiting the requirements or sourcing channels."
                .to_string(),
        );
    }
    insights
}
