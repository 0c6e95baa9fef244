//! Plain systems files: one sheet per system, named after the system

use crate::archive::ArchiveWorkbook;
use crate::config::CodecConfig;
use crate::results_codec::{
    DecodeWarning, METADATA_SHEET, PROTOTYPE_SHEET, SIMILARITY_RESULTS_SHEET, SYSTEM_SHEET_PREFIX,
};
use crate::workbook::{check_sheet_name, MemoryWorkbook, Workbook};
use momo_core::{Error, MultiSystemModel, Result, SystemModel, Table};
use std::path::Path;
use tracing::{debug, info, warn};

/// Optional results table a hand-authored systems file may carry
pub const RESULTS_SHEET: &str = "Results";

/// Sheets a systems file may carry that are not systems
pub const NON_SYSTEM_SHEETS: [&str; 4] = [METADATA_SHEET, SIMILARITY_RESULTS_SHEET, PROTOTYPE_SHEET, RESULTS_SHEET];

#[derive(Debug, Clone, Default)]
pub struct DecodedSystems {
    pub systems: Vec<SystemModel>,
    /// Raw `Prototype` sheet, when the file has one
    pub prototype_sheet: Option<Table>,
    /// Raw `Results` sheet, when the file has one
    pub results_sheet: Option<Table>,
    pub warnings: Vec<DecodeWarning>,
}

pub struct SystemsCodec {
    config: CodecConfig,
}

impl Default for SystemsCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl SystemsCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn encode(&self, systems: &MultiSystemModel) -> Result<MemoryWorkbook> {
        let mut workbook = MemoryWorkbook::new();
        for system in systems.iter() {
            self.check_system_sheet(system.name())?;
            workbook.write_sheet(system.name(), system.to_table())?;
        }
        Ok(workbook)
    }

    /// Every sheet that is not reserved becomes one system. `System_*`
    /// sheets lose their prefix, so the systems of a results file whose
    /// Metadata is damaged can still be recovered this way. `Prototype` and
    /// `Results` sheets are returned as they are.
    pub fn decode<W: Workbook + ?Sized>(&self, workbook: &W) -> Result<DecodedSystems> {
        let mut decoded = DecodedSystems::default();
        for sheet in workbook.list_sheets() {
            if sheet == PROTOTYPE_SHEET || sheet == RESULTS_SHEET {
                match workbook.read_sheet(&sheet) {
                    Ok(table) => {
                        debug!("Keeping optional sheet '{}' ({} rows)", sheet, table.len());
                        if sheet == PROTOTYPE_SHEET {
                            decoded.prototype_sheet = Some(table);
                        } else {
                            decoded.results_sheet = Some(table);
                        }
                    }
                    Err(e) => {
                        warn!("Skipping optional sheet '{}': {}", sheet, e);
                        decoded.warnings.push(DecodeWarning::OptionalSheetSkipped {
                            sheet,
                            reason: e.to_string(),
                        });
                    }
                }
                continue;
            }
            if NON_SYSTEM_SHEETS.contains(&sheet.as_str()) {
                debug!("Ignoring non-system sheet '{}'", sheet);
                continue;
            }
            let name = sheet.strip_prefix(SYSTEM_SHEET_PREFIX).unwrap_or(&sheet).to_string();
            if decoded.systems.iter().any(|s| s.name() == name) {
                warn!("Skipping sheet '{}': system '{}' already loaded", sheet, name);
                decoded.warnings.push(DecodeWarning::SystemSheetSkipped {
                    reason: format!("system '{}' already loaded", name),
                    sheet,
                });
                continue;
            }

            match workbook
                .read_sheet(&sheet)
                .and_then(|table| SystemModel::from_table(name, &table))
            {
                Ok(system) => decoded.systems.push(system),
                Err(e) => {
                    warn!("Skipping sheet '{}': {}", sheet, e);
                    decoded.warnings.push(DecodeWarning::SystemSheetSkipped {
                        sheet,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(decoded)
    }

    pub fn save<P: AsRef<Path>>(&self, systems: &MultiSystemModel, path: P) -> Result<()> {
        let path = path.as_ref();
        let workbook = self.encode(systems)?;
        ArchiveWorkbook::from_memory(&workbook)?.save(path, &self.config)?;
        info!("Saved {} systems to {:?}", systems.len(), path);
        Ok(())
    }

    /// Write one system into `path`, replacing a sheet of the same name and
    /// keeping every other sheet. Creates the file if it does not exist.
    pub fn save_system<P: AsRef<Path>>(&self, system: &SystemModel, path: P) -> Result<()> {
        let path = path.as_ref();
        self.check_system_sheet(system.name())?;

        let mut workbook = if path.exists() {
            ArchiveWorkbook::open(path, &self.config)?
        } else {
            ArchiveWorkbook::new()
        };
        workbook.write_sheet(system.name(), system.to_table())?;
        workbook.save(path, &self.config)?;
        info!("Saved system '{}' to {:?}", system.name(), path);
        Ok(())
    }

    fn check_system_sheet(&self, name: &str) -> Result<()> {
        if NON_SYSTEM_SHEETS.contains(&name) || name.starts_with(SYSTEM_SHEET_PREFIX) {
            return Err(Error::Validation(format!(
                "System name '{}' is reserved for a sheet of results files",
                name
            )));
        }
        check_sheet_name(name, self.config.max_sheet_name_len)
    }
}
