use serde::Serialize;

use super::alternatives::{AlternativeSet, AlternativeStoreError};
use super::criteria::{CriterionSet, CriterionStoreError, WeightBounds};
use super::domain::{Alternative, Criterion, CriterionCategory, Region};

/// Seed criteria and alternatives a new analysis starts from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionBlueprint {
    pub criteria: Vec<Criterion>,
    pub alternatives: Vec<Alternative>,
    pub regions: Vec<Region>,
    pub weight_bounds: WeightBounds,
}

impl DecisionBlueprint {
    /// Forest land-use comparison: conservation against three development paths.
    pub fn land_use() -> Self {
        let criteria = vec![
            Criterion::new(
                "biodiversity",
                "Biodiversity Conservation",
                25,
                CriterionCategory::Environmental,
            )
            .with_description("Impact on species diversity and habitat protection"),
            Criterion::new(
                "carbon",
                "Carbon Sequestration",
                20,
                CriterionCategory::Environmental,
            )
            .with_description("Carbon storage and climate change mitigation"),
            Criterion::new(
                "economic",
                "Economic Benefits",
                20,
                CriterionCategory::Economic,
            )
            .with_description("Economic returns and job creation"),
            Criterion::new("social", "Social Impact", 15, CriterionCategory::Social)
                .with_description("Community benefits and livelihood improvement"),
            Criterion::new(
                "sustainability",
                "Long-term Sustainability",
                20,
                CriterionCategory::Environmental,
            )
            .with_description("Long-term viability and resource management"),
        ];

        let alternatives = vec![
            scored(
                "conservation",
                "Strict Conservation",
                "Complete protection with no development",
                [95.0, 90.0, 30.0, 40.0, 85.0],
            ),
            scored(
                "ecotourism",
                "Ecotourism Development",
                "Sustainable tourism with conservation focus",
                [75.0, 70.0, 80.0, 85.0, 75.0],
            ),
            scored(
                "agroforestry",
                "Agroforestry System",
                "Integrated agriculture and forestry",
                [60.0, 65.0, 75.0, 80.0, 70.0],
            ),
            scored(
                "selective",
                "Selective Logging",
                "Sustainable timber harvesting",
                [45.0, 50.0, 85.0, 70.0, 55.0],
            ),
        ];

        Self {
            criteria,
            alternatives,
            regions: Region::all().to_vec(),
            weight_bounds: WeightBounds::slider(),
        }
    }

    pub fn criterion_set(&self) -> Result<CriterionSet, CriterionStoreError> {
        CriterionSet::new(self.criteria.clone())
    }

    pub fn alternative_set(&self) -> Result<AlternativeSet, AlternativeStoreError> {
        AlternativeSet::new(self.alternatives.clone())
    }
}

const LAND_USE_KEYS: [&str; 5] = [
    "biodiversity",
    "carbon",
    "economic",
    "social",
    "sustainability",
];

fn scored(id: &str, name: &str, description: &str, scores: [f64; 5]) -> Alternative {
    LAND_USE_KEYS.iter().zip(scores).fold(
        Alternative::new(id, name).with_description(description),
        |alternative, (key, score)| alternative.with_score(*key, score),
    )
}
