//! # MoMo Core
//!
//! Data model for morphological models.
//!
//! This crate provides the types a similarity run is described with:
//!
//! - [`SystemModel`] - A named boolean matrix of features × alternatives
//! - [`MultiSystemModel`] - Ordered, name-unique collection of systems
//! - [`Prototype`] - Sparse (system, feature) → state assignment
//! - [`ResultsMap`] - Scored combinations plus everything needed to reproduce them
//! - [`Table`] / [`CellValue`] - The tabular form persisted by `momo-storage`
//!
//! ## Example
//!
//! ```rust
//! use momo_core::{
//!     Combination, MultiSystemModel, Prototype, ResultsMap, SimilarityMeasureType, SystemModel,
//! };
//!
//! let a = SystemModel::from_rows(
//!     "A",
//!     vec!["f1".into(), "f2".into()],
//!     vec!["a1".into(), "a2".into()],
//!     vec![vec![1, 0], vec![0, 1]],
//! )
//! .unwrap();
//! let b = SystemModel::from_rows("B", vec!["g1".into()], vec!["b1".into(), "b2".into()], vec![vec![1, 1]])
//!     .unwrap();
//! let systems = MultiSystemModel::from_systems(vec![a, b]).unwrap();
//!
//! let mut prototype = Prototype::from_systems(&systems);
//! prototype.set("A", "f1", true);
//!
//! let results = ResultsMap::from_parts(
//!     systems,
//!     vec![
//!         (Combination::new(["a1", "b1"]), 0.8),
//!         (Combination::new(["a2", "b2"]), 0.5),
//!     ],
//!     prototype,
//!     SimilarityMeasureType::SorensenDice,
//! )
//! .unwrap();
//!
//! assert_eq!(results.results().rows[0].similarity, 0.8);
//! ```

pub mod error;
pub mod table;
pub mod system;
pub mod multi_system;
pub mod prototype;
pub mod measure;
pub mod combination;
pub mod results;

pub use error::{Error, Result};
pub use table::{CellValue, Table};
pub use system::SystemModel;
pub use multi_system::MultiSystemModel;
pub use prototype::{Prototype, PrototypeKey};
pub use measure::SimilarityMeasureType;
pub use combination::Combination;
pub use results::{
    ResultRow, ResultsMap, ResultsMapSource, ResultsParts, ResultsRecord, ResultsTable,
    SimilarityMeasures, SIMILARITY_COLUMN,
};
