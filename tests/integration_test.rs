// Integration tests for MoMo
use momo_core::{
    CellValue, Combination, Error, MultiSystemModel, Prototype, ResultsMap, SimilarityMeasureType,
    SystemModel, Table,
};
use momo_storage::{
    ArchiveWorkbook, CodecConfig, DecodeWarning, FileKind, FileKindClassifier, LoadedFile, Loader,
    ResultsCodec, SystemsCodec, Workbook,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn sample_systems() -> MultiSystemModel {
    let a = SystemModel::from_rows(
        "A",
        labels(&["f1", "f2"]),
        labels(&["a1", "a2"]),
        vec![vec![1, 0], vec![0, 1]],
    )
    .unwrap();
    let b = SystemModel::from_rows("B", labels(&["g1"]), labels(&["b1", "b2"]), vec![vec![1, 1]]).unwrap();
    MultiSystemModel::from_systems(vec![a, b]).unwrap()
}

fn sample_results() -> ResultsMap {
    let mut prototype = Prototype::new();
    prototype.set("A", "f1", true);
    prototype.set("A", "f2", false);
    prototype.set("B", "g1", true);

    ResultsMap::from_parts(
        sample_systems(),
        vec![
            (Combination::new(["a1", "b1"]), 0.8),
            (Combination::new(["a2", "b2"]), 0.5),
        ],
        prototype,
        SimilarityMeasureType::SorensenDice,
    )
    .unwrap()
}

#[test]
fn test_results_file_round_trip() {
    init_tracing();
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("results.momo");

    let original = sample_results();
    ResultsCodec::default().save(&original, &path).unwrap();

    let decoded = ResultsCodec::default().load(&path).unwrap();
    assert!(decoded.is_complete());

    let results = decoded.results;
    assert_eq!(results.systems_names(), ["A", "B"]);
    assert_eq!(results.similarity_measure_type(), SimilarityMeasureType::SorensenDice);
    assert_eq!(results.prototype().get("A", "f1"), Some(true));
    assert_eq!(results.prototype().get("A", "f2"), Some(false));
    assert_eq!(results.prototype().get("B", "g1"), Some(true));
    assert_eq!(results.systems(), original.systems());
    assert_eq!(results, original);

    let table = results.results();
    assert_eq!(table.columns, ["A", "B", "Similarity"]);
    let scores: Vec<f64> = table.rows.iter().map(|r| r.similarity).collect();
    assert_eq!(scores, vec![0.8, 0.5]);
    assert_eq!(table.rows[0].combination, Combination::new(["a1", "b1"]));
}

#[test]
fn test_classifier_on_saved_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = CodecConfig::default();

    let results_path = temp_dir.path().join("results.momo");
    ResultsCodec::default().save(&sample_results(), &results_path).unwrap();
    let workbook = ArchiveWorkbook::open(&results_path, &config).unwrap();
    assert!(FileKindClassifier::is_results_file(&workbook));

    let systems_path = temp_dir.path().join("systems.momo");
    SystemsCodec::default().save(&sample_systems(), &systems_path).unwrap();
    let workbook = ArchiveWorkbook::open(&systems_path, &config).unwrap();
    assert!(!FileKindClassifier::is_results_file(&workbook));
    assert_eq!(FileKindClassifier::classify(&workbook), FileKind::Systems);
}

#[test]
fn test_damaged_system_sheet_is_skipped() {
    init_tracing();
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("results.momo");
    let config = CodecConfig::default();
    ResultsCodec::default().save(&sample_results(), &path).unwrap();

    let mut workbook = ArchiveWorkbook::open(&path, &config).unwrap();
    workbook
        .write_sheet("System_B", Table::with_rows(labels(&["", "b1"]), vec![vec![]]))
        .unwrap();
    workbook.save(&path, &config).unwrap();

    let decoded = ResultsCodec::default().load(&path).unwrap();
    assert!(!decoded.is_complete());
    assert!(matches!(
        decoded.warnings.as_slice(),
        [DecodeWarning::SystemSheetSkipped { sheet, .. }] if sheet == "System_B"
    ));

    let results = decoded.results;
    assert_eq!(results.systems_names(), ["A", "B"]);
    assert_eq!(results.systems().names(), vec!["A"]);
    assert_eq!(results.missing_systems(), vec!["B"]);
    assert_eq!(results.len(), 2);
}

#[test]
fn test_non_numeric_score_is_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("results.momo");
    let config = CodecConfig::default();
    ResultsCodec::default().save(&sample_results(), &path).unwrap();

    let mut workbook = ArchiveWorkbook::open(&path, &config).unwrap();
    workbook
        .write_sheet(
            "Similarity_Results",
            Table::with_rows(
                labels(&["A", "B", "Similarity"]),
                vec![vec!["a1".into(), "b1".into(), "high".into()]],
            ),
        )
        .unwrap();
    workbook.save(&path, &config).unwrap();

    let result = ResultsCodec::default().load(&path);
    assert!(matches!(result, Err(Error::Decode { .. })));
    assert!(Loader::default().load(&path).is_err());
}

#[test]
fn test_rename_keeps_positions() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("renamed.momo");

    let mut results = sample_results();
    results.rename_system("A", "Engine").unwrap();
    ResultsCodec::default().save(&results, &path).unwrap();

    let decoded = ResultsCodec::default().load(&path).unwrap().results;
    assert_eq!(decoded.systems_names(), ["Engine", "B"]);
    assert_eq!(decoded.score(&Combination::new(["a1", "b1"])), Some(0.8));
    assert_eq!(decoded.prototype().get("Engine", "f1"), Some(true));
    assert_eq!(decoded.prototype().get("A", "f1"), None);
    assert!(decoded.systems().get("Engine").is_some());
}

#[test]
fn test_loader_dispatch() {
    let temp_dir = tempfile::tempdir().unwrap();
    let loader = Loader::default();

    let results_path = temp_dir.path().join("results.momo");
    ResultsCodec::default().save(&sample_results(), &results_path).unwrap();
    match loader.load(&results_path).unwrap() {
        LoadedFile::Results { results, systems, warnings } => {
            assert_eq!(results.len(), 2);
            assert_eq!(systems.len(), 2);
            assert!(warnings.is_empty());
        }
        other => panic!("expected results, got {:?}", other.kind()),
    }

    let systems_path = temp_dir.path().join("systems.momo");
    SystemsCodec::default().save(&sample_systems(), &systems_path).unwrap();
    let loaded = loader.load(&systems_path).unwrap();
    assert_eq!(loaded.kind(), FileKind::Systems);
    assert!(loaded.results().is_none());
    assert_eq!(loaded.systems(), sample_systems().into_systems().as_slice());

    assert!(matches!(
        loader.load(temp_dir.path().join("results.csv")),
        Err(Error::Load { .. })
    ));

    // A results container renamed to a spreadsheet extension is still refused
    let renamed = temp_dir.path().join("results.xlsx");
    std::fs::copy(&results_path, &renamed).unwrap();
    assert!(matches!(loader.load(&renamed), Err(Error::Load { .. })));
}

#[test]
fn test_systems_file_keeps_prototype_and_results_sheets() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("authored.momo");
    let config = CodecConfig::default();
    SystemsCodec::default().save(&sample_systems(), &path).unwrap();

    let prototype = Table::with_rows(
        labels(&["system", "feature", "state"]),
        vec![vec!["A".into(), "f1".into(), 1.into()]],
    );
    let mut workbook = ArchiveWorkbook::open(&path, &config).unwrap();
    workbook.write_sheet("Prototype", prototype.clone()).unwrap();
    workbook.save(&path, &config).unwrap();

    match Loader::default().load(&path).unwrap() {
        LoadedFile::Systems {
            systems,
            prototype_sheet,
            results_sheet,
            warnings,
        } => {
            assert_eq!(systems.len(), 2);
            assert_eq!(prototype_sheet, Some(prototype));
            assert!(results_sheet.is_none());
            assert!(warnings.is_empty());
        }
        other => panic!("expected systems, got {:?}", other.kind()),
    }
}

#[test]
fn test_empty_results_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("empty.momo");

    ResultsCodec::default().save(&ResultsMap::empty(), &path).unwrap();
    let decoded = ResultsCodec::default().load(&path).unwrap();
    assert!(decoded.results.is_empty());
    assert!(decoded.results.systems_names().is_empty());
    assert!(decoded.results.prototype().is_empty());
}

#[test]
fn test_random_results_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);
    let temp_dir = tempfile::tempdir().unwrap();
    let codec = ResultsCodec::default();

    for round in 0..5 {
        let system_count = rng.random_range(1..4);
        let mut systems = Vec::with_capacity(system_count);
        for s in 0..system_count {
            let features: Vec<String> = (0..rng.random_range(1..4)).map(|f| format!("s{}f{}", s, f)).collect();
            let alternatives: Vec<String> =
                (0..rng.random_range(1..5)).map(|a| format!("s{}a{}", s, a)).collect();
            let rows: Vec<Vec<CellValue>> = features
                .iter()
                .map(|_| alternatives.iter().map(|_| rng.random_bool(0.5).into()).collect())
                .collect();
            systems.push(SystemModel::from_rows(format!("Sys{}", s), features, alternatives, rows).unwrap());
        }

        // Every combination of one alternative per system
        let mut combinations: Vec<Vec<String>> = vec![Vec::new()];
        for system in &systems {
            combinations = combinations
                .into_iter()
                .flat_map(|prefix| {
                    system.alternatives().iter().map(move |a| {
                        let mut next = prefix.clone();
                        next.push(a.clone());
                        next
                    })
                })
                .collect();
        }
        let scores: Vec<(Combination, f64)> = combinations
            .into_iter()
            .map(|c| (Combination::from(c), rng.random::<f64>()))
            .collect();

        let systems = MultiSystemModel::from_systems(systems).unwrap();
        let mut prototype = Prototype::from_systems(&systems);
        for system in systems.iter() {
            for feature in system.features() {
                prototype.set(system.name(), feature.as_str(), rng.random_bool(0.5));
            }
        }

        let measure = SimilarityMeasureType::ALL[round % 2];
        let original = ResultsMap::from_parts(systems, scores, prototype, measure).unwrap();

        let path = temp_dir.path().join(format!("random_{}.momo", round));
        codec.save(&original, &path).unwrap();
        let decoded = codec.load(&path).unwrap();
        assert!(decoded.is_complete());

        let restored = decoded.results;
        assert_eq!(restored.systems_names(), original.systems_names());
        assert_eq!(restored.systems(), original.systems());
        assert_eq!(restored.prototype(), original.prototype());
        assert_eq!(restored.similarity_measure_type(), measure);
        assert_eq!(restored.len(), original.len());
        for (combination, score) in original.similarity_measures() {
            let restored_score = restored.score(combination).unwrap();
            assert!((restored_score - score).abs() < 1e-12);
        }
    }
}
