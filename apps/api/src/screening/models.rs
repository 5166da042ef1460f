use serde::{Deserialize, Serialize};

/// Education hierarchy, ordered low → high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    #[default]
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Phd,
}

impl EducationLevel {
    /// Levels checked when inferring a candidate's education, highest first.
    /// `HighSchool` is the fallback and never needs a keyword hit.
    pub const DETECTION_ORDER: [EducationLevel; 4] = [
        EducationLevel::Phd,
        EducationLevel::Master,
        EducationLevel::Bachelor,
        EducationLevel::Associate,
    ];

    /// Ordinal position on the 5-point hierarchy (high_school = 0, phd = 4).
    pub fn index(self) -> u8 {
        match self {
            EducationLevel::HighSchool => 0,
            EducationLevel::Associate => 1,
            EducationLevel::Bachelor => 2,
            EducationLevel::Master => 3,
            EducationLevel::Phd => 4,
        }
    }
}

/// A single skill the role asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: String,
    /// Expected proficiency, 1–10.
    pub level: i32,
    /// Relative multiplier; weights need not sum to anything.
    pub weight: f64,
}

/// Structured job profile a resume is screened against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub required_skills: Vec<SkillRequirement>,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub education_level: EducationLevel,
    #[serde(default)]
    pub cultural_values: Vec<String>,
    #[serde(default)]
    pub disqualifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub required_level: i32,
    pub candidate_level: u32,
    pub match_score: f64,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: Vec<SkillMatch>,
    pub experience_years: u32,
    pub education_level: EducationLevel,
    /// `"<value>: <matched keyword>"` entries.
    pub cultural_indicators: Vec<String>,
    pub red_flags: Vec<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongHire,
    Hire,
    Maybe,
    NoHire,
}

impl Recommendation {
    /// Red flags beyond this count force `NoHire` regardless of score.
    pub const MAX_TOLERATED_RED_FLAGS: usize = 2;

    /// Pure function of the adjusted total score and the red-flag count.
    pub fn from_score(total_score: f64, red_flag_count: usize) -> Self {
        if red_flag_count > Self::MAX_TOLERATED_RED_FLAGS {
            return Recommendation::NoHire;
        }
        if total_score >= 8.5 {
            Recommendation::StrongHire
        } else if total_score >= 7.0 {
            Recommendation::Hire
        } else if total_score >= 5.0 {
            Recommendation::Maybe
        } else {
            Recommendation::NoHire
        }
    }

    pub fn is_hire(self) -> bool {
        matches!(self, Recommendation::StrongHire | Recommendation::Hire)
    }
}

/// Output of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub total_score: f64,
    pub skill_match: f64,
    pub experience_match: f64,
    pub cultural_fit: f64,
    pub education_match: f64,
    pub breakdown: ScoreBreakdown,
    pub recommendation: Recommendation,
}

/// A resume submitted for batch screening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInput {
    pub id: String,
    pub resume: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub candidate_id: String,
    pub score: CandidateScore,
}
