//! Results file encoding
//!
//! A results file is a workbook laid out as:
//!
//! ```text
//! Metadata            one row: file_type | version | date | similarity_measure_type
//! Similarity_Results  <system names...> | Similarity     (best score first)
//! Prototype           system | feature | state           (system only on a group's first row)
//! System_<name>       one sheet per system matrix
//! ```
//!
//! Decoding rebuilds the [`ResultsMap`] from explicit column values, never
//! from row positions. The Metadata sentinel, the score table and the
//! prototype are required; a `System_*` sheet that cannot be read is skipped
//! and reported as a [`DecodeWarning`].

use crate::archive::ArchiveWorkbook;
use crate::classify::FileKindClassifier;
use crate::config::CodecConfig;
use crate::workbook::{check_sheet_name, sanitize_sheet_name, MemoryWorkbook, Workbook};
use momo_core::{
    CellValue, Combination, Error, MultiSystemModel, Prototype, PrototypeKey, Result, ResultsMap,
    ResultsMapSource, SimilarityMeasureType, SystemModel, Table,
};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

pub const METADATA_SHEET: &str = "Metadata";
pub const SIMILARITY_RESULTS_SHEET: &str = "Similarity_Results";
pub const PROTOTYPE_SHEET: &str = "Prototype";
/// Reserved prefix of per-system sheets; system names may not start with it
pub const SYSTEM_SHEET_PREFIX: &str = "System_";

pub const FILE_TYPE_COLUMN: &str = "file_type";
pub const VERSION_COLUMN: &str = "version";
pub const DATE_COLUMN: &str = "date";
pub const MEASURE_TYPE_COLUMN: &str = "similarity_measure_type";
pub const RESULTS_FILE_TYPE: &str = "MoMo_Results";

const PROTOTYPE_COLUMNS: [&str; 3] = ["system", "feature", "state"];

/// Recoverable problem met while decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// A system sheet could not be turned into a system and was left out
    SystemSheetSkipped { sheet: String, reason: String },
    /// A system sheet matching none of the result columns
    OrphanSystemSheet { sheet: String },
    /// An optional non-system sheet could not be read and was left out
    OptionalSheetSkipped { sheet: String, reason: String },
    /// Stored measure type was not recognised; the default was used
    UnknownMeasureType { raw: String },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::SystemSheetSkipped { sheet, reason } => {
                write!(f, "skipped sheet '{}': {}", sheet, reason)
            }
            DecodeWarning::OrphanSystemSheet { sheet } => {
                write!(f, "sheet '{}' matches no result column", sheet)
            }
            DecodeWarning::OptionalSheetSkipped { sheet, reason } => {
                write!(f, "left out optional sheet '{}': {}", sheet, reason)
            }
            DecodeWarning::UnknownMeasureType { raw } => write!(
                f,
                "unknown similarity measure type '{}', using {}",
                raw,
                SimilarityMeasureType::default()
            ),
        }
    }
}

/// A decoded results file plus everything that was recovered around
#[derive(Debug, Clone)]
pub struct DecodedResults {
    pub results: ResultsMap,
    pub warnings: Vec<DecodeWarning>,
}

impl DecodedResults {
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Sheet name of a system in a results file
pub fn system_sheet_name(system: &str) -> String {
    format!("{}{}", SYSTEM_SHEET_PREFIX, sanitize_sheet_name(system))
}

pub struct ResultsCodec {
    config: CodecConfig,
}

impl Default for ResultsCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl ResultsCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Lay out a results file in memory. Nothing is returned unless every
    /// sheet was built.
    ///
    /// Under [`CodecConfig::spreadsheet_compatible`] a system name longer
    /// than 24 characters is rejected, as its `System_` sheet would exceed
    /// the 31 character limit.
    pub fn encode(&self, results: &ResultsMap) -> Result<MemoryWorkbook> {
        let sheet_names = self.system_sheet_names(results.systems_names())?;

        let mut workbook = MemoryWorkbook::new();
        workbook.write_sheet(METADATA_SHEET, self.metadata_table(results))?;
        workbook.write_sheet(SIMILARITY_RESULTS_SHEET, results.results().to_table())?;
        workbook.write_sheet(PROTOTYPE_SHEET, prototype_table(results.prototype()))?;
        for system in results.systems().iter() {
            let sheet = sheet_names.get(system.name()).ok_or_else(|| {
                Error::Validation(format!("System '{}' is not a result column", system.name()))
            })?;
            workbook.write_sheet(sheet, system.to_table())?;
        }

        debug!(
            "Encoded results: {} combinations, {} systems, {} prototype entries",
            results.len(),
            results.systems().len(),
            results.prototype().len()
        );
        Ok(workbook)
    }

    /// Encode and write to `path` atomically
    pub fn save<P: AsRef<Path>>(&self, results: &ResultsMap, path: P) -> Result<()> {
        let path = path.as_ref();
        let workbook = self.encode(results)?;
        ArchiveWorkbook::from_memory(&workbook)?.save(path, &self.config)?;
        info!("Saved {} results to {:?}", results.len(), path);
        Ok(())
    }

    /// Open `path` and decode it as a results file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<DecodedResults> {
        let path = path.as_ref();
        let workbook = ArchiveWorkbook::open(path, &self.config)?;
        let decoded = self.decode(&workbook)?;
        info!(
            "Loaded {} results from {:?} ({} warnings)",
            decoded.results.len(),
            path,
            decoded.warnings.len()
        );
        Ok(decoded)
    }

    pub fn decode<W: Workbook + ?Sized>(&self, workbook: &W) -> Result<DecodedResults> {
        let mut warnings = Vec::new();

        let metadata = read_metadata(workbook)?;

        let scores = workbook.read_sheet(SIMILARITY_RESULTS_SHEET)?;
        let (systems_names, similarity_measures) = decode_scores(&scores)?;

        let systems = decode_systems(workbook, &systems_names, &mut warnings)?;

        let prototype = decode_prototype(&workbook.read_sheet(PROTOTYPE_SHEET)?)?;

        let raw_measure_type = metadata
            .column_index(MEASURE_TYPE_COLUMN)
            .and_then(|i| metadata.cell(0, i))
            .and_then(CellValue::as_label)
            .unwrap_or_default();
        let (similarity_measure_type, known) = SimilarityMeasureType::parse_lenient(&raw_measure_type);
        if !known {
            warn!(
                "Unknown similarity measure type '{}', falling back to {}",
                raw_measure_type, similarity_measure_type
            );
            warnings.push(DecodeWarning::UnknownMeasureType {
                raw: raw_measure_type,
            });
        }

        let results = ResultsMap::new(ResultsMapSource::FromDecodedFile {
            systems_names,
            systems,
            similarity_measures,
            prototype,
            similarity_measure_type,
        })?;

        Ok(DecodedResults { results, warnings })
    }

    fn metadata_table(&self, results: &ResultsMap) -> Table {
        let columns = [FILE_TYPE_COLUMN, VERSION_COLUMN, DATE_COLUMN, MEASURE_TYPE_COLUMN]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let row = vec![
            CellValue::from(RESULTS_FILE_TYPE),
            CellValue::from(self.config.format_version.as_str()),
            CellValue::from(self.config.timestamp_string()),
            CellValue::from(results.similarity_measure_type().as_str()),
        ];
        Table::with_rows(columns, vec![row])
    }

    /// System name -> sheet name, rejecting names the layout cannot carry
    fn system_sheet_names<'a>(&self, names: &'a [String]) -> Result<HashMap<&'a str, String>> {
        let mut sheets: HashMap<&str, String> = HashMap::with_capacity(names.len());
        let mut taken: HashMap<String, &str> = HashMap::with_capacity(names.len());

        for name in names {
            if name.starts_with(SYSTEM_SHEET_PREFIX) {
                return Err(Error::Validation(format!(
                    "System name '{}' starts with the reserved prefix '{}'",
                    name, SYSTEM_SHEET_PREFIX
                )));
            }
            let sheet = system_sheet_name(name);
            check_sheet_name(&sheet, self.config.max_sheet_name_len)?;
            if let Some(other) = taken.insert(sheet.clone(), name.as_str()) {
                return Err(Error::Validation(format!(
                    "Systems '{}' and '{}' both map to sheet '{}'",
                    other, name, sheet
                )));
            }
            sheets.insert(name.as_str(), sheet);
        }
        Ok(sheets)
    }
}

/// Read and check the Metadata sentinel
fn read_metadata<W: Workbook + ?Sized>(workbook: &W) -> Result<Table> {
    if !FileKindClassifier::is_results_file(workbook) {
        return Err(Error::InvalidFormat(format!(
            "Missing or malformed '{}' sheet: not a results file",
            METADATA_SHEET
        )));
    }
    workbook.read_sheet(METADATA_SHEET)
}

fn decode_scores(table: &Table) -> Result<(Vec<String>, Vec<(Combination, f64)>)> {
    let sheet = SIMILARITY_RESULTS_SHEET;
    let Some((_, names)) = table.columns.split_last() else {
        return Err(Error::decode(sheet, None, "sheet has no columns"));
    };

    let mut seen = ahash_set(names.len());
    for name in names {
        if name.is_empty() || !seen.insert(name.as_str()) {
            return Err(Error::decode(
                sheet,
                None,
                format!("system column '{}' is empty or repeated", name),
            ));
        }
    }

    let width = table.width();
    let mut measures = Vec::with_capacity(table.len());
    let mut combinations = ahash_set(table.len());
    for (i, row) in table.rows.iter().enumerate() {
        if row.len() != width {
            return Err(Error::decode(
                sheet,
                Some(i),
                format!("expected {} cells, found {}", width, row.len()),
            ));
        }

        let Some((score_cell, alternative_cells)) = row.split_last() else {
            return Err(Error::decode(sheet, Some(i), "empty row"));
        };
        let score = score_cell
            .as_f64()
            .filter(|s| s.is_finite())
            .ok_or_else(|| Error::decode(sheet, Some(i), format!("score '{}' is not a finite number", score_cell)))?;

        let mut alternatives = Vec::with_capacity(alternative_cells.len());
        for cell in alternative_cells {
            let label = cell
                .as_label()
                .ok_or_else(|| Error::decode(sheet, Some(i), "empty alternative"))?;
            alternatives.push(label);
        }

        let combination = Combination::from(alternatives);
        if !combinations.insert(combination.clone()) {
            return Err(Error::decode(
                sheet,
                Some(i),
                format!("duplicate combination {}", combination),
            ));
        }
        measures.push((combination, score));
    }

    debug!("Decoded {} scores over systems {:?}", measures.len(), names);
    Ok((names.to_vec(), measures))
}

fn decode_systems<W: Workbook + ?Sized>(
    workbook: &W,
    systems_names: &[String],
    warnings: &mut Vec<DecodeWarning>,
) -> Result<MultiSystemModel> {
    let by_sheet: HashMap<String, &str> = systems_names
        .iter()
        .map(|n| (system_sheet_name(n), n.as_str()))
        .collect();

    let mut decoded: HashMap<&str, SystemModel> = HashMap::new();
    for sheet in workbook.list_sheets() {
        if !sheet.starts_with(SYSTEM_SHEET_PREFIX) {
            continue;
        }
        let Some(&name) = by_sheet.get(&sheet) else {
            warn!("Skipping system sheet '{}': not a result column", sheet);
            warnings.push(DecodeWarning::OrphanSystemSheet { sheet });
            continue;
        };

        match workbook
            .read_sheet(&sheet)
            .and_then(|table| SystemModel::from_table(name, &table))
        {
            Ok(system) => {
                debug!("Decoded system '{}' {:?}", name, system.shape());
                decoded.insert(name, system);
            }
            Err(e) => {
                warn!("Skipping system sheet '{}': {}", sheet, e);
                warnings.push(DecodeWarning::SystemSheetSkipped {
                    sheet,
                    reason: e.to_string(),
                });
            }
        }
    }

    // Result-column order, whatever order the sheets were stored in
    let mut systems = MultiSystemModel::new();
    for name in systems_names {
        if let Some(system) = decoded.remove(name.as_str()) {
            systems.add(system)?;
        }
    }
    Ok(systems)
}

fn prototype_table(prototype: &Prototype) -> Table {
    let mut table = Table::new(PROTOTYPE_COLUMNS.iter().map(|c| c.to_string()).collect());
    let mut previous: Option<&str> = None;
    for (key, state) in prototype.iter() {
        // Two-level index: the system label is written once per group
        let system = if previous == Some(key.system.as_str()) {
            CellValue::Empty
        } else {
            CellValue::from(key.system.as_str())
        };
        previous = Some(key.system.as_str());
        table.push_row(vec![
            system,
            CellValue::from(key.feature.as_str()),
            CellValue::Number(if state { 1.0 } else { 0.0 }),
        ]);
    }
    table
}

fn decode_prototype(table: &Table) -> Result<Prototype> {
    let sheet = PROTOTYPE_SHEET;
    if table.width() != PROTOTYPE_COLUMNS.len() {
        return Err(Error::decode(
            sheet,
            None,
            format!("expected {} columns, found {}", PROTOTYPE_COLUMNS.len(), table.width()),
        ));
    }

    let mut entries = Vec::with_capacity(table.len());
    let mut current_system: Option<String> = None;
    for (i, row) in table.rows.iter().enumerate() {
        let [system, feature, state] = row.as_slice() else {
            return Err(Error::decode(
                sheet,
                Some(i),
                format!("expected 3 cells, found {}", row.len()),
            ));
        };

        if let Some(label) = system.as_label() {
            current_system = Some(label);
        }
        let system = current_system
            .clone()
            .ok_or_else(|| Error::decode(sheet, Some(i), "no system label"))?;
        let feature = feature
            .as_label()
            .ok_or_else(|| Error::decode(sheet, Some(i), "no feature label"))?;
        let state = parse_state(state)
            .ok_or_else(|| Error::decode(sheet, Some(i), format!("state '{}' is not 0/1", state)))?;

        entries.push((PrototypeKey::new(system, feature), state));
    }

    Ok(entries.into_iter().collect())
}

fn parse_state(cell: &CellValue) -> Option<bool> {
    match cell {
        CellValue::Bool(b) => Some(*b),
        CellValue::Number(n) if n.is_finite() => Some(*n != 0.0),
        CellValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            other => other.parse::<f64>().ok().filter(|n| n.is_finite()).map(|n| n != 0.0),
        },
        _ => None,
    }
}

fn ahash_set<T: std::hash::Hash + Eq>(capacity: usize) -> ahash::AHashSet<T> {
    ahash::AHashSet::with_capacity(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn system(name: &str, features: &[&str], alternatives: &[&str]) -> SystemModel {
        let mut system = SystemModel::new(name).unwrap();
        for f in features {
            system.add_feature(*f).unwrap();
        }
        for a in alternatives {
            system.add_alternative(*a).unwrap();
        }
        system
    }

    fn scenario() -> ResultsMap {
        let mut a = system("A", &["f1", "f2"], &["a1", "a2"]);
        a.set("f1", "a1", true).unwrap();
        a.set("f2", "a2", true).unwrap();
        let b = system("B", &["g1"], &["b1", "b2"]);
        let systems = MultiSystemModel::from_systems(vec![a, b]).unwrap();

        let mut prototype = Prototype::new();
        prototype.set("A", "f1", true);
        prototype.set("A", "f2", false);
        prototype.set("B", "g1", true);

        ResultsMap::from_parts(
            systems,
            vec![
                (Combination::new(["a1", "b1"]), 0.8),
                (Combination::new(["a2", "b2"]), 0.5),
            ],
            prototype,
            SimilarityMeasureType::SorensenDice,
        )
        .unwrap()
    }

    fn codec() -> ResultsCodec {
        let timestamp = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ResultsCodec::new(CodecConfig::default().with_timestamp(timestamp))
    }

    #[test]
    fn test_layout() {
        let workbook = codec().encode(&scenario()).unwrap();
        assert_eq!(
            workbook.list_sheets(),
            vec!["Metadata", "Similarity_Results", "Prototype", "System_A", "System_B"]
        );

        let metadata = workbook.sheet(METADATA_SHEET).unwrap();
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.rows[0][0], CellValue::from("MoMo_Results"));
        assert_eq!(metadata.rows[0][2], CellValue::from("2024-05-01T12:00:00"));
        assert_eq!(metadata.rows[0][3], CellValue::from("Sorensen_Dice"));

        let scores = workbook.sheet(SIMILARITY_RESULTS_SHEET).unwrap();
        assert_eq!(scores.columns, vec!["A", "B", "Similarity"]);
        assert_eq!(scores.rows[0][2], CellValue::Number(0.8));

        let prototype = workbook.sheet(PROTOTYPE_SHEET).unwrap();
        assert_eq!(prototype.rows[0][0], CellValue::from("A"));
        assert_eq!(prototype.rows[1][0], CellValue::Empty);
        assert_eq!(prototype.rows[2][0], CellValue::from("B"));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let original = scenario();
        let workbook = codec().encode(&original).unwrap();
        let decoded = codec().decode(&workbook).unwrap();

        assert!(decoded.is_complete());
        assert_eq!(decoded.results, original);
    }

    #[test]
    fn test_decode_ignores_row_order() {
        let mut workbook = codec().encode(&scenario()).unwrap();
        workbook.sheet_mut(SIMILARITY_RESULTS_SHEET).unwrap().rows.reverse();
        let decoded = codec().decode(&workbook).unwrap();
        assert_eq!(decoded.results.score(&Combination::new(["a1", "b1"])), Some(0.8));
        assert_eq!(decoded.results.score(&Combination::new(["a2", "b2"])), Some(0.5));
    }

    #[test]
    fn test_reserved_prefix_rejected() {
        let systems = MultiSystemModel::from_systems(vec![system("System_X", &[], &[])]).unwrap();
        let results = ResultsMap::from_parts(systems, Vec::new(), Prototype::new(), SimilarityMeasureType::Jaccard)
            .unwrap();
        assert!(matches!(codec().encode(&results), Err(Error::Validation(_))));
    }

    #[test]
    fn test_sanitized_collision_rejected() {
        let systems = MultiSystemModel::from_systems(vec![system("a/b", &[], &[]), system("a:b", &[], &[])]).unwrap();
        let results = ResultsMap::from_parts(systems, Vec::new(), Prototype::new(), SimilarityMeasureType::Jaccard)
            .unwrap();
        assert!(matches!(codec().encode(&results), Err(Error::Validation(_))));
    }

    #[test]
    fn test_sanitized_name_survives_round_trip() {
        let systems = MultiSystemModel::from_systems(vec![system("in/out", &["f"], &["x"])]).unwrap();
        let results = ResultsMap::from_parts(
            systems,
            vec![(Combination::new(["x"]), 1.0)],
            Prototype::new(),
            SimilarityMeasureType::Jaccard,
        )
        .unwrap();

        let workbook = codec().encode(&results).unwrap();
        assert!(workbook.has_sheet("System_in_out"));
        let decoded = codec().decode(&workbook).unwrap();
        assert_eq!(decoded.results.systems().names(), vec!["in/out"]);
    }

    #[test]
    fn test_long_system_name() {
        let name = "Propulsion and Power Distribution";
        let systems = MultiSystemModel::from_systems(vec![system(name, &["f"], &["x"])]).unwrap();
        let results = ResultsMap::from_parts(
            systems,
            vec![(Combination::new(["x"]), 0.25)],
            Prototype::new(),
            SimilarityMeasureType::Jaccard,
        )
        .unwrap();

        let workbook = codec().encode(&results).unwrap();
        let decoded = codec().decode(&workbook).unwrap();
        assert_eq!(decoded.results, results);

        let limited = ResultsCodec::new(CodecConfig::default().spreadsheet_compatible());
        assert!(matches!(limited.encode(&results), Err(Error::Validation(_))));
    }

    #[test]
    fn test_missing_metadata_is_invalid_format() {
        let mut workbook = codec().encode(&scenario()).unwrap();
        workbook.remove_sheet(METADATA_SHEET);
        assert!(matches!(codec().decode(&workbook), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_non_numeric_score_is_fatal() {
        let mut workbook = codec().encode(&scenario()).unwrap();
        workbook.sheet_mut(SIMILARITY_RESULTS_SHEET).unwrap().rows[1][2] = CellValue::from("n/a");
        match codec().decode(&workbook) {
            Err(Error::Decode { sheet, row, .. }) => {
                assert_eq!(sheet, SIMILARITY_RESULTS_SHEET);
                assert_eq!(row, Some(1));
            }
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_text_score_is_coerced() {
        let mut workbook = codec().encode(&scenario()).unwrap();
        workbook.sheet_mut(SIMILARITY_RESULTS_SHEET).unwrap().rows[0][2] = CellValue::from("0.75");
        let decoded = codec().decode(&workbook).unwrap();
        assert_eq!(decoded.results.score(&Combination::new(["a1", "b1"])), Some(0.75));
    }

    #[test]
    fn test_corrupt_system_sheet_is_skipped() {
        let mut workbook = codec().encode(&scenario()).unwrap();
        workbook.sheet_mut("System_B").unwrap().rows[0].pop();

        let decoded = codec().decode(&workbook).unwrap();
        assert_eq!(decoded.results.systems().names(), vec!["A"]);
        assert_eq!(decoded.results.systems_names(), &["A".to_string(), "B".to_string()]);
        assert_eq!(decoded.results.missing_systems(), vec!["B"]);
        assert!(matches!(
            decoded.warnings.as_slice(),
            [DecodeWarning::SystemSheetSkipped { sheet, .. }] if sheet == "System_B"
        ));
    }

    #[test]
    fn test_orphan_system_sheet_is_reported() {
        let mut workbook = codec().encode(&scenario()).unwrap();
        workbook
            .write_sheet("System_C", system("C", &[], &[]).to_table())
            .unwrap();
        let decoded = codec().decode(&workbook).unwrap();
        assert_eq!(decoded.results.systems().len(), 2);
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::OrphanSystemSheet {
                sheet: "System_C".to_string()
            }]
        );
    }

    #[test]
    fn test_unknown_measure_type_falls_back() {
        let mut workbook = codec().encode(&scenario()).unwrap();
        workbook.sheet_mut(METADATA_SHEET).unwrap().rows[0][3] = CellValue::from("Tanimoto");
        let decoded = codec().decode(&workbook).unwrap();
        assert_eq!(decoded.results.similarity_measure_type(), SimilarityMeasureType::default());
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::UnknownMeasureType {
                raw: "Tanimoto".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_prototype_is_fatal() {
        let mut workbook = codec().encode(&scenario()).unwrap();
        workbook.remove_sheet(PROTOTYPE_SHEET);
        assert!(codec().decode(&workbook).is_err());
    }

    #[test]
    fn test_prototype_states_are_coerced() {
        let mut table = Table::new(PROTOTYPE_COLUMNS.iter().map(|c| c.to_string()).collect());
        table.push_row(vec!["A".into(), "f1".into(), "TRUE".into()]);
        table.push_row(vec![CellValue::Empty, "f2".into(), CellValue::Bool(false)]);
        table.push_row(vec!["Orphan".into(), 7.into(), "1".into()]);

        let prototype = decode_prototype(&table).unwrap();
        assert_eq!(prototype.get("A", "f1"), Some(true));
        assert_eq!(prototype.get("A", "f2"), Some(false));
        assert_eq!(prototype.get("Orphan", "7"), Some(true));

        table.push_row(vec!["A".into(), "f3".into(), "maybe".into()]);
        assert!(matches!(decode_prototype(&table), Err(Error::Decode { row: Some(3), .. })));
    }
}
