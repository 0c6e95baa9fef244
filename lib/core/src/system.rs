//! A single named boolean matrix relating features (rows) to alternatives (columns)

use crate::table::{CellValue, Table};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A named features × alternatives boolean matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemModel {
    name: String,
    features: Vec<String>,
    alternatives: Vec<String>,
    /// Row-major, `cells[feature][alternative]`
    cells: Vec<Vec<bool>>,
}

impl SystemModel {
    /// Create an empty system with no features and no alternatives
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            features: Vec::new(),
            alternatives: Vec::new(),
            cells: Vec::new(),
        })
    }

    /// Create a system from labelled rows. Every cell is coerced to 0/1.
    pub fn from_rows<C: Into<CellValue>>(
        name: impl Into<String>,
        features: Vec<String>,
        alternatives: Vec<String>,
        rows: Vec<Vec<C>>,
    ) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        ensure_unique(&features, "feature")?;
        ensure_unique(&alternatives, "alternative")?;

        if rows.len() != features.len() {
            return Err(Error::Validation(format!(
                "System '{}' has {} features but {} rows",
                name,
                features.len(),
                rows.len()
            )));
        }

        let mut cells = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != alternatives.len() {
                return Err(Error::Validation(format!(
                    "Row '{}' of system '{}' has {} cells, expected {}",
                    features[i],
                    name,
                    row.len(),
                    alternatives.len()
                )));
            }
            cells.push(row.into_iter().map(|c| c.into().is_truthy()).collect());
        }

        Ok(Self {
            name,
            features,
            alternatives,
            cells,
        })
    }

    /// Build a system from a sheet whose first column holds feature labels
    /// and whose remaining header cells are alternative labels.
    pub fn from_table(name: impl Into<String>, table: &Table) -> Result<Self> {
        let name = name.into();
        if let Some(row) = table.first_ragged_row() {
            return Err(Error::Validation(format!(
                "System '{}' is not rectangular: row {} has {} cells, header has {}",
                name,
                row,
                table.rows[row].len(),
                table.width()
            )));
        }

        let alternatives: Vec<String> = table.columns.iter().skip(1).cloned().collect();
        let mut features = Vec::with_capacity(table.len());
        let mut rows = Vec::with_capacity(table.len());
        for (i, row) in table.rows.iter().enumerate() {
            let label = row.first().and_then(CellValue::as_label).ok_or_else(|| {
                Error::Validation(format!("System '{}' row {} has no feature label", name, i))
            })?;
            features.push(label);
            rows.push(row.iter().skip(1).cloned().collect::<Vec<_>>());
        }

        Self::from_rows(name, features, alternatives, rows)
    }

    /// Sheet view: index column followed by one 0/1 column per alternative
    pub fn to_table(&self) -> Table {
        let mut columns = Vec::with_capacity(self.alternatives.len() + 1);
        columns.push(String::new());
        columns.extend(self.alternatives.iter().cloned());

        let rows = self
            .features
            .iter()
            .zip(&self.cells)
            .map(|(feature, row)| {
                let mut out = Vec::with_capacity(row.len() + 1);
                out.push(CellValue::Text(feature.clone()));
                out.extend(row.iter().map(|&b| CellValue::Number(if b { 1.0 } else { 0.0 })));
                out
            })
            .collect();

        Table::with_rows(columns, rows)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        validate_name(&new_name)?;
        self.name = new_name;
        Ok(())
    }

    #[inline]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    #[inline]
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// (features, alternatives)
    pub fn shape(&self) -> (usize, usize) {
        (self.features.len(), self.alternatives.len())
    }

    pub fn get(&self, feature: &str, alternative: &str) -> Option<bool> {
        let (f, a) = self.position(feature, alternative)?;
        Some(self.cells[f][a])
    }

    pub fn set(&mut self, feature: &str, alternative: &str, value: bool) -> Result<()> {
        let (f, a) = self.require_position(feature, alternative)?;
        self.cells[f][a] = value;
        Ok(())
    }

    /// Flip a cell, returning its new value
    pub fn toggle(&mut self, feature: &str, alternative: &str) -> Result<bool> {
        let (f, a) = self.require_position(feature, alternative)?;
        self.cells[f][a] = !self.cells[f][a];
        Ok(self.cells[f][a])
    }

    /// Append a feature row with every cell unset
    pub fn add_feature(&mut self, feature: impl Into<String>) -> Result<()> {
        let feature = feature.into();
        if self.features.contains(&feature) {
            return Err(Error::DuplicateName(format!(
                "feature '{}' in system '{}'",
                feature, self.name
            )));
        }
        self.features.push(feature);
        self.cells.push(vec![false; self.alternatives.len()]);
        Ok(())
    }

    /// Append an alternative column with every cell unset
    pub fn add_alternative(&mut self, alternative: impl Into<String>) -> Result<()> {
        let alternative = alternative.into();
        if self.alternatives.contains(&alternative) {
            return Err(Error::DuplicateName(format!(
                "alternative '{}' in system '{}'",
                alternative, self.name
            )));
        }
        self.alternatives.push(alternative);
        for row in &mut self.cells {
            row.push(false);
        }
        Ok(())
    }

    pub fn remove_feature(&mut self, feature: &str) -> bool {
        match self.features.iter().position(|f| f == feature) {
            Some(i) => {
                self.features.remove(i);
                self.cells.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn remove_alternative(&mut self, alternative: &str) -> bool {
        match self.alternatives.iter().position(|a| a == alternative) {
            Some(i) => {
                self.alternatives.remove(i);
                for row in &mut self.cells {
                    row.remove(i);
                }
                true
            }
            None => false,
        }
    }

    pub fn rename_feature(&mut self, old: &str, new: impl Into<String>) -> Result<()> {
        let name = self.name.clone();
        relabel(&mut self.features, old, new.into(), "feature", &name)
    }

    pub fn rename_alternative(&mut self, old: &str, new: impl Into<String>) -> Result<()> {
        let name = self.name.clone();
        relabel(&mut self.alternatives, old, new.into(), "alternative", &name)
    }

    fn position(&self, feature: &str, alternative: &str) -> Option<(usize, usize)> {
        let f = self.features.iter().position(|x| x == feature)?;
        let a = self.alternatives.iter().position(|x| x == alternative)?;
        Some((f, a))
    }

    fn require_position(&self, feature: &str, alternative: &str) -> Result<(usize, usize)> {
        self.position(feature, alternative).ok_or_else(|| {
            Error::Validation(format!(
                "No cell ({}, {}) in system '{}'",
                feature, alternative, self.name
            ))
        })
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Validation("System name cannot be empty".to_string()));
    }
    Ok(())
}

fn ensure_unique(labels: &[String], kind: &str) -> Result<()> {
    let mut seen = ahash::AHashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(Error::DuplicateName(format!("{} '{}'", kind, label)));
        }
    }
    Ok(())
}

fn relabel(labels: &mut [String], old: &str, new: String, kind: &str, system: &str) -> Result<()> {
    if old == new {
        return Ok(());
    }
    if labels.contains(&new) {
        return Err(Error::DuplicateName(format!(
            "{} '{}' in system '{}'",
            kind, new, system
        )));
    }
    let slot = labels.iter_mut().find(|l| l.as_str() == old).ok_or_else(|| {
        Error::Validation(format!("No {} '{}' in system '{}'", kind, old, system))
    })?;
    *slot = new;
    Ok(())
}
