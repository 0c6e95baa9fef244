use crate::results_codec::{FILE_TYPE_COLUMN, METADATA_SHEET, RESULTS_FILE_TYPE};
use crate::workbook::Workbook;
use momo_core::{CellValue, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Saved by the results codec, tagged through the Metadata sentinel
    Results,
    /// Plain system matrices, one per sheet
    Systems,
}

/// Tells results files from plain systems files without decoding either
pub struct FileKindClassifier;

impl FileKindClassifier {
    /// `true` only for a readable single-row `Metadata` sheet whose
    /// `file_type` is the results sentinel. Never fails.
    pub fn is_results_file<W: Workbook + ?Sized>(workbook: &W) -> bool {
        Self::read_sentinel(workbook).unwrap_or(false)
    }

    pub fn classify<W: Workbook + ?Sized>(workbook: &W) -> FileKind {
        if Self::is_results_file(workbook) {
            FileKind::Results
        } else {
            FileKind::Systems
        }
    }

    fn read_sentinel<W: Workbook + ?Sized>(workbook: &W) -> Result<bool> {
        if !workbook.has_sheet(METADATA_SHEET) {
            return Ok(false);
        }
        let metadata = workbook.read_sheet(METADATA_SHEET)?;
        if metadata.len() != 1 {
            return Ok(false);
        }
        let column = metadata
            .column_index(FILE_TYPE_COLUMN)
            .ok_or_else(|| Error::InvalidFormat(format!("no '{}' column", FILE_TYPE_COLUMN)))?;
        Ok(matches!(
            metadata.cell(0, column),
            Some(CellValue::Text(value)) if value == RESULTS_FILE_TYPE
        ))
    }
}
