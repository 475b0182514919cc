use serde::{Deserialize, Serialize};

/// How the engine treats an alternative lacking a score for an active criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingScorePolicy {
    /// The criterion contributes nothing to that alternative's total.
    #[default]
    #[serde(alias = "zero")]
    TreatAsZero,
    /// Scoring fails on the first missing entry.
    Reject,
}

impl MissingScorePolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "zero" | "treat_as_zero" | "default" => Some(Self::TreatAsZero),
            "reject" | "error" | "strict" => Some(Self::Reject),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MissingScorePolicy::TreatAsZero => "zero",
            MissingScorePolicy::Reject => "reject",
        }
    }
}

/// Scoring policy applied by [`super::ScoringEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub missing_score: MissingScorePolicy,
    /// Refuse to rank when the weights do not sum to 100.
    #[serde(default)]
    pub enforce_weight_sum: bool,
}
