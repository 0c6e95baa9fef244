//! # MoMo
//!
//! Results and system persistence for morphological models.
//!
//! A morphological model is a set of *systems*, each a boolean matrix of
//! features × alternatives. A similarity run scores every combination of
//! one alternative per system against a *prototype*. This crate keeps those
//! results, and the systems behind them, in one self-describing file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use momo::prelude::*;
//!
//! let a = SystemModel::from_rows("A", vec!["f1".into()], vec!["a1".into(), "a2".into()], vec![vec![1, 0]])
//!     .unwrap();
//! let b = SystemModel::from_rows("B", vec!["g1".into()], vec!["b1".into()], vec![vec![1]]).unwrap();
//! let systems = MultiSystemModel::from_systems(vec![a, b]).unwrap();
//! let prototype = Prototype::from_systems(&systems);
//!
//! let results = ResultsMap::from_parts(
//!     systems,
//!     vec![(Combination::new(["a1", "b1"]), 0.8), (Combination::new(["a2", "b1"]), 0.4)],
//!     prototype,
//!     SimilarityMeasureType::SorensenDice,
//! )
//! .unwrap();
//!
//! ResultsCodec::default().save(&results, "results.momo").unwrap();
//!
//! match Loader::default().load("results.momo").unwrap() {
//!     LoadedFile::Results { results, .. } => assert_eq!(results.len(), 2),
//!     LoadedFile::Systems { .. } => unreachable!(),
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`momo-core`](momo_core) - Data model (systems, prototype, results)
//! - [`momo-storage`](momo_storage) - Workbook container, file-kind classification, codecs
//!
//! ## File Kinds
//!
//! - **Results file**: `Metadata` sentinel sheet, `Similarity_Results`,
//!   `Prototype` and one `System_<name>` sheet per system
//! - **Systems file**: one sheet per system, no sentinel

// Re-export core types
pub use momo_core::{
    CellValue, Combination, Error, MultiSystemModel, Prototype, PrototypeKey, Result, ResultRow,
    ResultsMap, ResultsMapSource, ResultsTable, SimilarityMeasureType, SystemModel, Table,
};

// Re-export storage
pub use momo_storage::{
    ArchiveWorkbook, CodecConfig, DecodeWarning, DecodedResults, DecodedSystems, FileKind,
    FileKindClassifier, LoadedFile, Loader, MemoryWorkbook, ResultsCodec, SystemsCodec, Workbook,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Combination, Error, MultiSystemModel, Prototype, Result, ResultsMap, SimilarityMeasureType,
        SystemModel,
        CodecConfig, FileKind, FileKindClassifier, LoadedFile, Loader, ResultsCodec, SystemsCodec,
        Workbook,
    };
}
