use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Decode error in sheet '{sheet}'{}: {message}", row_suffix(.row))]
    Decode {
        sheet: String,
        /// Zero-based data row (header excluded), if the failure is row-local
        row: Option<usize>,
        message: String,
    },

    #[error("Failed to load '{path}': {message}")]
    Load { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" at row {}", r),
        None => String::new(),
    }
}

impl Error {
    pub fn decode(sheet: impl Into<String>, row: Option<usize>, message: impl Into<String>) -> Self {
        Error::Decode {
            sheet: sheet.into(),
            row,
            message: message.into(),
        }
    }

    pub fn load(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Load {
            path: path.into(),
            message: message.into(),
        }
    }
}
