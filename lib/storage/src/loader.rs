use crate::archive::ArchiveWorkbook;
use crate::classify::{FileKind, FileKindClassifier};
use crate::config::CodecConfig;
use crate::results_codec::{DecodeWarning, ResultsCodec};
use crate::systems_codec::SystemsCodec;
use crate::workbook::Workbook;
use momo_core::{Error, ResultsMap, Result, SystemModel, Table};
use std::path::Path;
use tracing::info;

/// File extensions accepted by [`Loader::load`]
pub const ACCEPTED_EXTENSIONS: [&str; 1] = ["momo"];

/// Spreadsheet extensions, named in the rejection message
const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// What an opened file turned out to hold
#[derive(Debug, Clone)]
pub enum LoadedFile {
    Results {
        results: ResultsMap,
        /// Raw matrices of `results`, for callers that only want systems
        systems: Vec<SystemModel>,
        warnings: Vec<DecodeWarning>,
    },
    Systems {
        systems: Vec<SystemModel>,
        /// `Prototype` sheet kept verbatim from the file
        prototype_sheet: Option<Table>,
        /// `Results` sheet kept verbatim from the file
        results_sheet: Option<Table>,
        warnings: Vec<DecodeWarning>,
    },
}

impl LoadedFile {
    pub fn kind(&self) -> FileKind {
        match self {
            LoadedFile::Results { .. } => FileKind::Results,
            LoadedFile::Systems { .. } => FileKind::Systems,
        }
    }

    pub fn systems(&self) -> &[SystemModel] {
        match self {
            LoadedFile::Results { systems, .. } | LoadedFile::Systems { systems, .. } => systems,
        }
    }

    pub fn results(&self) -> Option<&ResultsMap> {
        match self {
            LoadedFile::Results { results, .. } => Some(results),
            LoadedFile::Systems { .. } => None,
        }
    }

    pub fn warnings(&self) -> &[DecodeWarning] {
        match self {
            LoadedFile::Results { warnings, .. } | LoadedFile::Systems { warnings, .. } => warnings,
        }
    }
}

/// Opens a file and dispatches to the right decoder
pub struct Loader {
    config: CodecConfig,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl Loader {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Path checks done before anything is opened
    pub fn validate_path(path: &Path) -> Result<()> {
        let display = path.display().to_string();
        if display.is_empty() {
            return Err(Error::load(display, "no file path provided"));
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::load(
                display,
                format!(
                    "spreadsheet files are not readable, export the model as .{}",
                    ACCEPTED_EXTENSIONS[0]
                ),
            ));
        }
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::load(
                display,
                format!("unsupported file extension, expected one of {:?}", ACCEPTED_EXTENSIONS),
            ));
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<LoadedFile> {
        let path = path.as_ref();
        Self::validate_path(path)?;

        let workbook = ArchiveWorkbook::open(path, &self.config)?;
        if workbook.list_sheets().is_empty() {
            return Err(Error::load(path.display().to_string(), "no sheets found"));
        }

        let loaded = self.load_workbook(&workbook)?;
        info!(
            "Loaded {:?} file {:?}: {} systems, {} warnings",
            loaded.kind(),
            path,
            loaded.systems().len(),
            loaded.warnings().len()
        );
        Ok(loaded)
    }

    /// Dispatch on an already opened workbook
    pub fn load_workbook<W: Workbook + ?Sized>(&self, workbook: &W) -> Result<LoadedFile> {
        match FileKindClassifier::classify(workbook) {
            FileKind::Results => {
                let decoded = ResultsCodec::new(self.config.clone()).decode(workbook)?;
                let systems = decoded.results.systems().iter().cloned().collect();
                Ok(LoadedFile::Results {
                    results: decoded.results,
                    systems,
                    warnings: decoded.warnings,
                })
            }
            FileKind::Systems => {
                let decoded = SystemsCodec::new(self.config.clone()).decode(workbook)?;
                Ok(LoadedFile::Systems {
                    systems: decoded.systems,
                    prototype_sheet: decoded.prototype_sheet,
                    results_sheet: decoded.results_sheet,
                    warnings: decoded.warnings,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(Loader::validate_path(Path::new("model.momo")).is_ok());
        assert!(Loader::validate_path(Path::new("model.MOMO")).is_ok());
        assert!(matches!(
            Loader::validate_path(Path::new("model.csv")),
            Err(Error::Load { .. })
        ));
        assert!(matches!(Loader::validate_path(Path::new("")), Err(Error::Load { .. })));
    }

    #[test]
    fn test_spreadsheet_rejected_before_open() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("model.xlsx");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        match Loader::default().load(&path) {
            Err(Error::Load { message, .. }) => assert!(message.contains("spreadsheet")),
            other => panic!("expected a load error, got {:?}", other.map(|l| l.kind())),
        }
        assert!(matches!(
            Loader::validate_path(Path::new("model.XLS")),
            Err(Error::Load { message, .. }) if message.contains(".momo")
        ));
    }

    #[test]
    fn test_missing_file_is_single_load_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = Loader::default().load(temp_dir.path().join("missing.momo"));
        assert!(matches!(result, Err(Error::Load { .. })));
    }
}
