//! Multi-sheet container abstraction
//!
//! The codecs only ever talk to a [`Workbook`]; the concrete container
//! (in-memory, the gzip/tar archive, or anything else tabular) is swappable.

use momo_core::{Error, Result, Table};

/// Characters a spreadsheet sheet name cannot contain
pub const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

pub trait Workbook {
    /// Sheet names in stored order
    fn list_sheets(&self) -> Vec<String>;

    fn read_sheet(&self, name: &str) -> Result<Table>;

    /// Replace the sheet called `name`, or append it if there is none
    fn write_sheet(&mut self, name: &str, table: Table) -> Result<()>;

    fn has_sheet(&self, name: &str) -> bool {
        self.list_sheets().iter().any(|s| s == name)
    }
}

/// Ordered in-memory workbook
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Table)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(&self, name: &str) -> Option<&Table> {
        self.sheets.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.sheets.iter_mut().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn remove_sheet(&mut self, name: &str) -> Option<Table> {
        let i = self.sheets.iter().position(|(n, _)| n == name)?;
        Some(self.sheets.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.sheets.iter().map(|(n, t)| (n.as_str(), t))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl Workbook for MemoryWorkbook {
    fn list_sheets(&self) -> Vec<String> {
        self.sheets.iter().map(|(n, _)| n.clone()).collect()
    }

    fn read_sheet(&self, name: &str) -> Result<Table> {
        self.sheet(name)
            .cloned()
            .ok_or_else(|| Error::InvalidFormat(format!("Sheet '{}' not found", name)))
    }

    fn write_sheet(&mut self, name: &str, table: Table) -> Result<()> {
        if name.is_empty() {
            return Err(Error::Validation("Sheet name cannot be empty".to_string()));
        }
        match self.sheet_mut(name) {
            Some(existing) => *existing = table,
            None => self.sheets.push((name.to_string(), table)),
        }
        Ok(())
    }

    fn has_sheet(&self, name: &str) -> bool {
        self.sheet(name).is_some()
    }
}

/// Replace characters that cannot appear in a sheet name with `_`
pub fn sanitize_sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Check a final sheet name against container limits. `max_len` of `None`
/// leaves the length unbounded.
pub fn check_sheet_name(name: &str, max_len: Option<usize>) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Validation("Sheet name cannot be empty".to_string()));
    }
    if let Some(max_len) = max_len.filter(|&max| name.chars().count() > max) {
        return Err(Error::Validation(format!(
            "Sheet name '{}' is longer than {} characters",
            name, max_len
        )));
    }
    if name.chars().any(|c| FORBIDDEN_SHEET_CHARS.contains(&c)) {
        return Err(Error::Validation(format!(
            "Sheet name '{}' contains one of {:?}",
            name, FORBIDDEN_SHEET_CHARS
        )));
    }
    Ok(())
}
