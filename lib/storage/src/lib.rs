pub mod config;
pub mod workbook;
pub mod archive;
pub mod classify;
pub mod results_codec;
pub mod systems_codec;
pub mod loader;

pub use config::{CodecConfig, SPREADSHEET_SHEET_NAME_LEN};
pub use workbook::{MemoryWorkbook, Workbook};
pub use archive::ArchiveWorkbook;
pub use classify::{FileKind, FileKindClassifier};
pub use results_codec::{DecodeWarning, DecodedResults, ResultsCodec};
pub use systems_codec::{DecodedSystems, SystemsCodec};
pub use loader::{LoadedFile, Loader};
