use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;

use super::domain::{Criterion, RankedAlternative, Region, Scenario, ScenarioId};

/// Append-only storage for recorded scenarios.
pub trait ScenarioRepository: Send + Sync {
    fn append(&self, scenario: Scenario) -> Result<(), RepositoryError>;
    /// Most recent first, at most `limit` entries.
    fn list(&self, limit: usize) -> Result<Vec<Scenario>, RepositoryError>;
    fn fetch(&self, id: &ScenarioId) -> Result<Option<Scenario>, RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("scenario already recorded")]
    Conflict,
    #[error("scenario history unavailable: {0}")]
    Unavailable(String),
}

/// Process-lifetime history held behind a mutex.
#[derive(Debug, Default, Clone)]
pub struct InMemoryScenarioHistory {
    scenarios: Arc<Mutex<Vec<Scenario>>>,
}

impl InMemoryScenarioHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Scenario>>, RepositoryError> {
        self.scenarios
            .lock()
            .map_err(|_| RepositoryError::Unavailable("history lock poisoned".to_string()))
    }
}

impl ScenarioRepository for InMemoryScenarioHistory {
    fn append(&self, scenario: Scenario) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id() == scenario.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(scenario);
        Ok(())
    }

    fn list(&self, limit: usize) -> Result<Vec<Scenario>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }

    fn fetch(&self, id: &ScenarioId) -> Result<Option<Scenario>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|scenario| scenario.id() == id).cloned())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }
}

/// Compact listing entry for history views.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummaryView {
    pub id: ScenarioId,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    pub created_at: chrono::DateTime<Utc>,
    pub alternative_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
}

impl From<&Scenario> for ScenarioSummaryView {
    fn from(scenario: &Scenario) -> Self {
        Self {
            id: scenario.id().clone(),
            name: scenario.name().to_string(),
            description: scenario.description().to_string(),
            region: scenario.region(),
            created_at: scenario.created_at(),
            alternative_count: scenario.alternatives().len(),
            leader: scenario.leader().map(|entry| entry.name().to_string()),
        }
    }
}

/// Turns a finished ranking into an immutable scenario and stores it.
pub struct ScenarioRecorder<R> {
    repository: Arc<R>,
    sequence: AtomicU64,
}

impl<R> ScenarioRecorder<R>
where
    R: ScenarioRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> ScenarioId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ScenarioId(format!("scn-{id:06}"))
    }

    /// Record a copy of `criteria` and the ranked `alternatives` under a fresh id.
    pub fn record(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        region: Option<Region>,
        criteria: &[Criterion],
        alternatives: &[RankedAlternative],
    ) -> Result<Scenario, RepositoryError> {
        let scenario = Scenario::new(
            self.next_id(),
            name.into(),
            description.into(),
            region,
            Utc::now(),
            criteria.to_vec(),
            alternatives.to_vec(),
        );

        self.repository.append(scenario.clone())?;
        tracing::debug!(scenario = %scenario.id(), "scenario appended to history");
        Ok(scenario)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<Scenario>, RepositoryError> {
        self.repository.list(limit)
    }

    pub fn get(&self, id: &ScenarioId) -> Result<Option<Scenario>, RepositoryError> {
        self.repository.fetch(id)
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}
