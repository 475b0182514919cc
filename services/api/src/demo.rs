use crate::infra::{parse_missing_score, parse_region, parse_weight};
use clap::Args;
use land_mcda::config::{AppConfig, DecisionConfig};
use land_mcda::error::AppError;
use land_mcda::workflows::decision::{
    write_results_csv, AlternativeCsvImporter, AlternativeSet, AnalysisRequest,
    AnalysisServiceError, CriterionId, CriterionSet, DecisionAnalysisService, DecisionBlueprint,
    InMemoryScenarioHistory, MissingScorePolicy, Region, Scenario, ScenarioSummaryView,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Score sheet with id,name[,description] and one column per criterion id.
    #[arg(long)]
    pub(crate) alternatives_csv: Option<PathBuf>,
    /// Override a criterion weight, e.g. --weight economic=35 (repeatable).
    #[arg(long = "weight", value_parser = parse_weight)]
    pub(crate) weights: Vec<(CriterionId, u32)>,
    /// Rescale the weights to sum to 100 before ranking.
    #[arg(long)]
    pub(crate) normalize: bool,
    /// How to treat missing scores: zero or reject (defaults to configuration).
    #[arg(long, value_parser = parse_missing_score)]
    pub(crate) missing_score: Option<MissingScorePolicy>,
    /// Target region recorded with the analysis.
    #[arg(long, value_parser = parse_region, default_value = "kalimantan")]
    pub(crate) region: Region,
    /// Scenario name recorded with the analysis.
    #[arg(long, default_value = "Command-line ranking")]
    pub(crate) name: String,
    /// Write the ranked results as CSV.
    #[arg(long)]
    pub(crate) export_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Target region for the demo scenarios.
    #[arg(long, value_parser = parse_region)]
    pub(crate) region: Option<Region>,
    /// Name of the baseline scenario.
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Write the baseline results as CSV.
    #[arg(long)]
    pub(crate) export_csv: Option<PathBuf>,
}

pub(crate) fn run_ranking(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        alternatives_csv,
        weights,
        normalize,
        missing_score,
        region,
        name,
        export_csv,
    } = args;

    let mut decision = AppConfig::load()?.decision;
    if let Some(policy) = missing_score {
        decision.scoring.missing_score = policy;
    }

    let blueprint = DecisionBlueprint::land_use();
    let mut criteria = blueprint
        .criterion_set()
        .map_err(AnalysisServiceError::from)?;
    for (id, weight) in &weights {
        criteria
            .set_weight(id, *weight)
            .map_err(AnalysisServiceError::from)?;
    }
    if normalize {
        criteria.normalize().map_err(AnalysisServiceError::from)?;
    }

    let alternatives = match alternatives_csv {
        Some(path) => AlternativeCsvImporter::from_path(path, &criteria)?,
        None => blueprint
            .alternative_set()
            .map_err(AnalysisServiceError::from)?,
    };

    render_weights(&criteria);
    report_missing_scores(&criteria, &alternatives, decision.scoring.missing_score);

    let service = decision_service(&decision);
    let scenario = service.run_analysis(AnalysisRequest {
        name,
        description: None,
        region: Some(region),
        criteria: criteria.snapshot(),
        alternatives: alternatives.snapshot(),
    })?;

    render_scenario(&scenario);
    if let Some(path) = export_csv {
        export_scenario(&scenario, &path)?;
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        region,
        name,
        export_csv,
    } = args;

    let region = region.unwrap_or(Region::Kalimantan);
    let name = name.unwrap_or_else(|| format!("{} baseline", region.label()));
    let decision = AppConfig::load()?.decision;
    let service = decision_service(&decision);
    let blueprint = DecisionBlueprint::land_use();

    println!("Land-use decision analysis demo ({})", region.label());
    let mut criteria = blueprint
        .criterion_set()
        .map_err(AnalysisServiceError::from)?;
    render_weights(&criteria);

    let baseline = service.run_analysis(AnalysisRequest {
        name,
        description: None,
        region: Some(region),
        criteria: criteria.snapshot(),
        alternatives: blueprint.alternatives.clone(),
    })?;
    render_scenario(&baseline);
    if let Some(leader) = baseline.leader() {
        println!("\nWhy {} leads:", leader.name());
        for component in &leader.components {
            println!(
                "  - {}: {:.0} x {}% = {:.2}",
                component.criterion_id,
                component.raw_score,
                component.weight,
                component.contribution
            );
        }
    }

    println!("\nShifting weight toward economic returns");
    for (id, weight) in [("biodiversity", 15), ("economic", 30)] {
        criteria
            .adjust_weight(&CriterionId::new(id), weight, blueprint.weight_bounds)
            .map_err(AnalysisServiceError::from)?;
    }
    render_weights(&criteria);

    let development = service.run_analysis(AnalysisRequest {
        name: format!("{} development focus", region.label()),
        description: Some("Economic returns weighted above biodiversity".to_string()),
        region: Some(region),
        criteria: criteria.snapshot(),
        alternatives: blueprint.alternatives.clone(),
    })?;
    render_scenario(&development);

    println!("\nRecent scenarios (newest first)");
    for scenario in service.recent(service.recent_limit())? {
        let view = ScenarioSummaryView::from(&scenario);
        println!(
            "  - {} [{}] {} | {} alternatives | leader {} | {}",
            view.id,
            view.created_at.format("%Y-%m-%d %H:%M:%S"),
            view.name,
            view.alternative_count,
            view.leader.as_deref().unwrap_or("none"),
            view.description
        );
    }

    if let Some(path) = export_csv {
        export_scenario(&baseline, &path)?;
    }

    Ok(())
}

fn decision_service(
    config: &DecisionConfig,
) -> DecisionAnalysisService<InMemoryScenarioHistory> {
    DecisionAnalysisService::new(Arc::new(InMemoryScenarioHistory::new()), config.scoring)
        .with_recent_limit(config.recent_scenarios)
}

fn render_weights(criteria: &CriterionSet) {
    println!("Criteria weights:");
    for criterion in criteria.iter() {
        println!(
            "  - {:<28} {:>3}%  ({})",
            criterion.name,
            criterion.weight,
            criterion.category.label()
        );
    }
    let status = if criteria.is_valid_weighting() {
        "ready"
    } else {
        "must equal 100%"
    };
    println!("  Total: {}% ({status})", criteria.total_weight());
}

fn report_missing_scores(
    criteria: &CriterionSet,
    alternatives: &AlternativeSet,
    policy: MissingScorePolicy,
) {
    let missing = alternatives.missing_scores(criteria);
    if missing.is_empty() {
        return;
    }

    println!("Missing scores (policy: {}):", policy.label());
    for (alternative, criterion) in missing {
        println!("  - {alternative} has no score for {criterion}");
    }
}

fn render_scenario(scenario: &Scenario) {
    println!("\nScenario {}: {}", scenario.id(), scenario.name());
    println!("  {}", scenario.description());
    for entry in scenario.alternatives() {
        println!(
            "  #{} {:<26} {:>5}",
            entry.rank,
            entry.name(),
            entry.display_score()
        );
    }
}

fn export_scenario(scenario: &Scenario, path: &Path) -> Result<(), AppError> {
    let file = std::fs::File::create(path)?;
    write_results_csv(file, scenario)?;
    println!("\nResults written to {}", path.display());
    Ok(())
}
