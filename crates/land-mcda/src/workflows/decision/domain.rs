use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable key of an evaluation dimension, used to index alternative scores.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionId(pub String);

impl CriterionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for a candidate option.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlternativeId(pub String);

impl AlternativeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlternativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for recorded scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub String);

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Informational grouping for criteria; never consulted while scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionCategory {
    Environmental,
    Economic,
    Social,
}

impl CriterionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            CriterionCategory::Environmental => "environmental",
            CriterionCategory::Economic => "economic",
            CriterionCategory::Social => "social",
        }
    }
}

/// Weighted evaluation dimension. `weight` is in percentage points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub weight: u32,
    pub category: CriterionCategory,
}

impl Criterion {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        weight: u32,
        category: CriterionCategory,
    ) -> Self {
        Self {
            id: CriterionId::new(id),
            name: name.into(),
            description: String::new(),
            weight,
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Candidate option with raw per-criterion scores on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: AlternativeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scores: BTreeMap<CriterionId, f64>,
}

impl Alternative {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AlternativeId::new(id),
            name: name.into(),
            description: String::new(),
            scores: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_score(mut self, criterion: impl Into<String>, score: f64) -> Self {
        self.scores.insert(CriterionId::new(criterion), score);
        self
    }

    pub fn score(&self, criterion: &CriterionId) -> Option<f64> {
        self.scores.get(criterion).copied()
    }
}

/// One criterion's weighted share of an alternative's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub criterion_id: CriterionId,
    pub weight: u32,
    pub raw_score: f64,
    pub contribution: f64,
    /// The alternative had no score for this criterion and zero was used.
    pub defaulted: bool,
}

/// Alternative annotated with the derived total and rank of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    #[serde(flatten)]
    pub alternative: Alternative,
    pub total_score: f64,
    pub rank: usize,
    #[serde(default)]
    pub components: Vec<ScoreComponent>,
}

impl RankedAlternative {
    pub fn id(&self) -> &AlternativeId {
        &self.alternative.id
    }

    pub fn name(&self) -> &str {
        &self.alternative.name
    }

    /// Total formatted to one decimal place for rendering.
    pub fn display_score(&self) -> String {
        format!("{:.1}", self.total_score)
    }
}

/// Target regions offered by the analysis setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Kalimantan,
    Sumatra,
    Papua,
    Sulawesi,
    Java,
}

impl Region {
    pub const fn all() -> [Region; 5] {
        [
            Region::Kalimantan,
            Region::Sumatra,
            Region::Papua,
            Region::Sulawesi,
            Region::Java,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Region::Kalimantan => "kalimantan",
            Region::Sumatra => "sumatra",
            Region::Papua => "papua",
            Region::Sulawesi => "sulawesi",
            Region::Java => "java",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Region::Kalimantan => "Kalimantan",
            Region::Sumatra => "Sumatra",
            Region::Papua => "Papua",
            Region::Sulawesi => "Sulawesi",
            Region::Java => "Java",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::all()
            .into_iter()
            .find(|region| region.key().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable snapshot of a completed analysis.
///
/// Criteria and alternatives are owned copies taken when the analysis ran, so
/// later edits to the live stores never reach a recorded scenario. Fields are
/// only reachable through shared accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    id: ScenarioId,
    name: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<Region>,
    created_at: DateTime<Utc>,
    criteria: Vec<Criterion>,
    alternatives: Vec<RankedAlternative>,
}

impl Scenario {
    pub(crate) fn new(
        id: ScenarioId,
        name: String,
        description: String,
        region: Option<Region>,
        created_at: DateTime<Utc>,
        criteria: Vec<Criterion>,
        alternatives: Vec<RankedAlternative>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            region,
            created_at,
            criteria,
            alternatives,
        }
    }

    pub fn id(&self) -> &ScenarioId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn alternatives(&self) -> &[RankedAlternative] {
        &self.alternatives
    }

    /// Highest-ranked alternative, if any alternatives were scored.
    pub fn leader(&self) -> Option<&RankedAlternative> {
        self.alternatives.first()
    }
}
