//! Results of a similarity run
//!
//! A [`ResultsMap`] ties the scored combinations to the systems they were
//! computed over, the prototype used for scoring and the measure type. It is
//! built once from a [`ResultsMapSource`] and is what the storage layer
//! persists and restores.
//!
//! ## Column identity
//!
//! `systems_names` is stored next to the score mapping. Position `i` of every
//! [`Combination`] is the alternative chosen for `systems_names[i]`; renaming
//! a system relabels that position and never reorders tuples.

use crate::combination::Combination;
use crate::measure::SimilarityMeasureType;
use crate::multi_system::MultiSystemModel;
use crate::prototype::Prototype;
use crate::system::SystemModel;
use crate::table::{CellValue, Table};
use crate::{Error, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Header of the score column in the tabular view
pub const SIMILARITY_COLUMN: &str = "Similarity";

pub type SimilarityMeasures = HashMap<Combination, f64, ahash::RandomState>;

/// How a [`ResultsMap`] is being built
#[derive(Debug, Clone)]
pub enum ResultsMapSource {
    Empty,
    /// Output of a computation run: system names are taken from `systems`
    FromParts {
        systems: MultiSystemModel,
        similarity_measures: Vec<(Combination, f64)>,
        prototype: Prototype,
        similarity_measure_type: SimilarityMeasureType,
    },
    /// Restored from a results file. `systems` may lack some of
    /// `systems_names` when their sheets could not be read.
    FromDecodedFile {
        systems_names: Vec<String>,
        systems: MultiSystemModel,
        similarity_measures: Vec<(Combination, f64)>,
        prototype: Prototype,
        similarity_measure_type: SimilarityMeasureType,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResultsRecord", into = "ResultsRecord")]
pub struct ResultsMap {
    systems_names: Vec<String>,
    systems: MultiSystemModel,
    similarity_measures: SimilarityMeasures,
    prototype: Prototype,
    similarity_measure_type: SimilarityMeasureType,
}

/// Serialized form of a [`ResultsMap`]; scores are listed best first since
/// combination keys cannot be map keys in most formats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsRecord {
    pub systems_names: Vec<String>,
    pub systems: MultiSystemModel,
    pub similarity_measures: Vec<(Combination, f64)>,
    pub prototype: Prototype,
    pub similarity_measure_type: SimilarityMeasureType,
}

impl TryFrom<ResultsRecord> for ResultsMap {
    type Error = Error;

    fn try_from(record: ResultsRecord) -> Result<Self> {
        Self::new(ResultsMapSource::FromDecodedFile {
            systems_names: record.systems_names,
            systems: record.systems,
            similarity_measures: record.similarity_measures,
            prototype: record.prototype,
            similarity_measure_type: record.similarity_measure_type,
        })
    }
}

impl From<ResultsMap> for ResultsRecord {
    fn from(results: ResultsMap) -> Self {
        let similarity_measures = results
            .results()
            .rows
            .into_iter()
            .map(|row| (row.combination, row.similarity))
            .collect();
        Self {
            systems_names: results.systems_names,
            systems: results.systems,
            similarity_measures,
            prototype: results.prototype,
            similarity_measure_type: results.similarity_measure_type,
        }
    }
}

/// Borrowed view of the four persisted parts
#[derive(Debug, Clone, Copy)]
pub struct ResultsParts<'a> {
    pub systems_names: &'a [String],
    pub similarity_measures: &'a SimilarityMeasures,
    pub prototype: &'a Prototype,
    pub similarity_measure_type: SimilarityMeasureType,
}

impl Default for ResultsMap {
    fn default() -> Self {
        Self::empty()
    }
}

impl ResultsMap {
    pub fn new(source: ResultsMapSource) -> Result<Self> {
        match source {
            ResultsMapSource::Empty => Ok(Self::empty()),
            ResultsMapSource::FromParts {
                systems,
                similarity_measures,
                prototype,
                similarity_measure_type,
            } => Self::assemble(
                systems.names(),
                systems,
                similarity_measures,
                prototype,
                similarity_measure_type,
            ),
            ResultsMapSource::FromDecodedFile {
                systems_names,
                systems,
                similarity_measures,
                prototype,
                similarity_measure_type,
            } => Self::assemble(
                systems_names,
                systems,
                similarity_measures,
                prototype,
                similarity_measure_type,
            ),
        }
    }

    pub fn empty() -> Self {
        Self {
            systems_names: Vec::new(),
            systems: MultiSystemModel::new(),
            similarity_measures: SimilarityMeasures::default(),
            prototype: Prototype::new(),
            similarity_measure_type: SimilarityMeasureType::default(),
        }
    }

    pub fn from_parts(
        systems: MultiSystemModel,
        similarity_measures: Vec<(Combination, f64)>,
        prototype: Prototype,
        similarity_measure_type: SimilarityMeasureType,
    ) -> Result<Self> {
        Self::new(ResultsMapSource::FromParts {
            systems,
            similarity_measures,
            prototype,
            similarity_measure_type,
        })
    }

    fn assemble(
        systems_names: Vec<String>,
        systems: MultiSystemModel,
        similarity_measures: Vec<(Combination, f64)>,
        prototype: Prototype,
        similarity_measure_type: SimilarityMeasureType,
    ) -> Result<Self> {
        validate_names(&systems_names)?;
        validate_systems_order(&systems_names, &systems)?;

        let arity = systems_names.len();
        let mut measures = SimilarityMeasures::default();
        measures.reserve(similarity_measures.len());
        for (combination, score) in similarity_measures {
            if combination.len() != arity {
                return Err(Error::Validation(format!(
                    "Combination {} has {} alternatives, expected one per system ({})",
                    combination,
                    combination.len(),
                    arity
                )));
            }
            if !score.is_finite() {
                return Err(Error::Validation(format!(
                    "Score of {} is not a finite number: {}",
                    combination, score
                )));
            }
            if measures.contains_key(&combination) {
                return Err(Error::Validation(format!("Duplicate combination {}", combination)));
            }
            measures.insert(combination, score);
        }

        Ok(Self {
            systems_names,
            systems,
            similarity_measures: measures,
            prototype,
            similarity_measure_type,
        })
    }

    #[inline]
    pub fn systems_names(&self) -> &[String] {
        &self.systems_names
    }

    #[inline]
    pub fn systems(&self) -> &MultiSystemModel {
        &self.systems
    }

    #[inline]
    pub fn similarity_measures(&self) -> &SimilarityMeasures {
        &self.similarity_measures
    }

    #[inline]
    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    #[inline]
    pub fn similarity_measure_type(&self) -> SimilarityMeasureType {
        self.similarity_measure_type
    }

    pub fn score(&self, combination: &Combination) -> Option<f64> {
        self.similarity_measures.get(combination).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.similarity_measures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.similarity_measures.is_empty()
    }

    /// Names in `systems_names` with no raw matrix in `systems`
    pub fn missing_systems(&self) -> Vec<&str> {
        self.systems_names
            .iter()
            .filter(|n| !self.systems.contains(n))
            .map(String::as_str)
            .collect()
    }

    pub fn parts(&self) -> ResultsParts<'_> {
        ResultsParts {
            systems_names: &self.systems_names,
            similarity_measures: &self.similarity_measures,
            prototype: &self.prototype,
            similarity_measure_type: self.similarity_measure_type,
        }
    }

    /// Scores sorted by similarity, best first
    pub fn results(&self) -> ResultsTable {
        let mut rows: Vec<ResultRow> = self
            .similarity_measures
            .iter()
            .map(|(combination, &similarity)| ResultRow {
                combination: combination.clone(),
                similarity,
            })
            .collect();

        // Ties fall back to the combination so the order is reproducible
        rows.sort_by(|a, b| {
            OrderedFloat(b.similarity)
                .cmp(&OrderedFloat(a.similarity))
                .then_with(|| a.combination.cmp(&b.combination))
        });

        let mut columns = self.systems_names.clone();
        columns.push(SIMILARITY_COLUMN.to_string());
        ResultsTable { columns, rows }
    }

    /// Relabel a system. Combination tuples keep their positions.
    pub fn rename_system(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if new.is_empty() {
            return Err(Error::Validation("System name cannot be empty".to_string()));
        }
        let position = self
            .systems_names
            .iter()
            .position(|n| n == old)
            .ok_or_else(|| Error::Validation(format!("No system named '{}'", old)))?;
        if self.systems_names.iter().any(|n| n == new) {
            return Err(Error::DuplicateName(format!("system '{}'", new)));
        }
        // Orphan entries under `new` must not be overwritten
        if self.prototype.contains_system(new) {
            return Err(Error::DuplicateName(format!(
                "prototype entries of system '{}'",
                new
            )));
        }

        if self.systems.contains(old) {
            self.systems.rename(old, new)?;
        }
        self.prototype.rename_system(old, new)?;
        self.systems_names[position] = new.to_string();
        Ok(())
    }

    /// Raw system matrices, independent of the scores
    pub fn into_systems(self) -> Vec<SystemModel> {
        self.systems.into_systems()
    }
}

fn validate_names(names: &[String]) -> Result<()> {
    let mut seen = ahash::AHashSet::with_capacity(names.len());
    for name in names {
        if name.is_empty() {
            return Err(Error::Validation("System name cannot be empty".to_string()));
        }
        if !seen.insert(name.as_str()) {
            return Err(Error::Validation(format!("System name '{}' is not unique", name)));
        }
    }
    Ok(())
}

/// `systems` must appear in `names` in the same relative order
fn validate_systems_order(names: &[String], systems: &MultiSystemModel) -> Result<()> {
    let mut cursor = 0;
    for system in systems.iter() {
        match names[cursor..].iter().position(|n| n == system.name()) {
            Some(offset) => cursor += offset + 1,
            None => {
                return Err(Error::Validation(format!(
                    "System '{}' is not among the result columns {:?} or is out of order",
                    system.name(),
                    names
                )))
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub combination: Combination,
    pub similarity: f64,
}

/// Tabular view of a [`ResultsMap`]: system columns then `Similarity`
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl ResultsTable {
    pub fn to_table(&self) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<CellValue> = row
                    .combination
                    .alternatives()
                    .iter()
                    .map(|a| CellValue::Text(a.clone()))
                    .collect();
                cells.push(CellValue::Number(row.similarity));
                cells
            })
            .collect();
        Table::with_rows(self.columns.clone(), rows)
    }
}
