use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::super::alternatives::{AlternativeSet, AlternativeStoreError};
use super::super::criteria::CriterionSet;
use super::super::domain::{Alternative, CriterionId};

const ID_COLUMN: &str = "id";
const NAME_COLUMN: &str = "name";
const DESCRIPTION_COLUMN: &str = "description";

#[derive(Debug)]
pub enum AlternativeImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
    DuplicateColumn(String),
    UnknownCriterionColumn(String),
    InvalidScore {
        line: u64,
        column: String,
        value: String,
    },
    Store(AlternativeStoreError),
}

impl std::fmt::Display for AlternativeImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlternativeImportError::Io(err) => write!(f, "failed to read score sheet: {}", err),
            AlternativeImportError::Csv(err) => write!(f, "invalid score sheet CSV: {}", err),
            AlternativeImportError::MissingColumn(column) => {
                write!(f, "score sheet is missing the '{}' column", column)
            }
            AlternativeImportError::DuplicateColumn(column) => {
                write!(f, "score sheet repeats the '{}' column", column)
            }
            AlternativeImportError::UnknownCriterionColumn(column) => write!(
                f,
                "score sheet column '{}' does not match any criterion",
                column
            ),
            AlternativeImportError::InvalidScore {
                line,
                column,
                value,
            } => write!(
                f,
                "line {}: '{}' is not a numeric score for '{}'",
                line, value, column
            ),
            AlternativeImportError::Store(err) => {
                write!(f, "score sheet rejected: {}", err)
            }
        }
    }
}

impl std::error::Error for AlternativeImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AlternativeImportError::Io(err) => Some(err),
            AlternativeImportError::Csv(err) => Some(err),
            AlternativeImportError::Store(err) => Some(err),
            AlternativeImportError::MissingColumn(_)
            | AlternativeImportError::DuplicateColumn(_)
            | AlternativeImportError::UnknownCriterionColumn(_)
            | AlternativeImportError::InvalidScore { .. } => None,
        }
    }
}

impl From<std::io::Error> for AlternativeImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AlternativeImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<AlternativeStoreError> for AlternativeImportError {
    fn from(err: AlternativeStoreError) -> Self {
        Self::Store(err)
    }
}

/// Column layout resolved from the header row.
struct SheetLayout {
    id: usize,
    name: usize,
    description: Option<usize>,
    scores: Vec<(usize, CriterionId)>,
}

impl SheetLayout {
    fn from_headers(
        headers: &csv::StringRecord,
        criteria: &CriterionSet,
    ) -> Result<Self, AlternativeImportError> {
        let mut id = None;
        let mut name = None;
        let mut description = None;
        let mut scores = Vec::new();
        let mut seen = HashSet::new();

        for (index, header) in headers.iter().enumerate() {
            let normalized = header.trim_start_matches('\u{feff}').trim();
            let key = normalized.to_ascii_lowercase();
            if !seen.insert(key.clone()) {
                return Err(AlternativeImportError::DuplicateColumn(
                    normalized.to_string(),
                ));
            }
            match key.as_str() {
                ID_COLUMN => id = Some(index),
                NAME_COLUMN => name = Some(index),
                DESCRIPTION_COLUMN => description = Some(index),
                _ => {
                    let criterion = CriterionId::new(normalized);
                    if !criteria.contains(&criterion) {
                        return Err(AlternativeImportError::UnknownCriterionColumn(
                            normalized.to_string(),
                        ));
                    }
                    scores.push((index, criterion));
                }
            }
        }

        Ok(Self {
            id: id.ok_or(AlternativeImportError::MissingColumn(ID_COLUMN))?,
            name: name.ok_or(AlternativeImportError::MissingColumn(NAME_COLUMN))?,
            description,
            scores,
        })
    }

    fn alternative(&self, record: &csv::StringRecord) -> Result<Alternative, AlternativeImportError> {
        let cell = |index: usize| record.get(index).unwrap_or_default();
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        let mut alternative = Alternative::new(cell(self.id), cell(self.name));
        if let Some(index) = self.description {
            alternative.description = cell(index).to_string();
        }

        for (index, criterion) in &self.scores {
            let raw = cell(*index);
            if raw.is_empty() {
                continue;
            }
            let score = raw
                .parse::<f64>()
                .map_err(|_| AlternativeImportError::InvalidScore {
                    line,
                    column: criterion.to_string(),
                    value: raw.to_string(),
                })?;
            alternative.scores.insert(criterion.clone(), score);
        }

        Ok(alternative)
    }
}

/// Loads alternatives from a score sheet whose score columns are criterion ids.
pub struct AlternativeCsvImporter;

impl AlternativeCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        criteria: &CriterionSet,
    ) -> Result<AlternativeSet, AlternativeImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, criteria)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        criteria: &CriterionSet,
    ) -> Result<AlternativeSet, AlternativeImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let layout = SheetLayout::from_headers(csv_reader.headers()?, criteria)?;

        let mut alternatives = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            alternatives.push(layout.alternative(&record)?);
        }

        Ok(AlternativeSet::new(alternatives)?)
    }
}
