use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppError {
    /// No tried encoding could decode the byte stream as text.
    DecodeFailure,
    /// No row in the scanned window yielded usable column names.
    HeaderNotFound,
    /// A header was found but the identifier or category role could not be
    /// bound; carries the observed column names for diagnostics.
    ColumnsNotFound { columns: Vec<String> },
    /// The source file has zero bytes or zero data rows.
    EmptyInput,
    /// The file extension maps to no supported format.
    Unsupported(String),
    ParseError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DecodeFailure => {
                write!(f, "Decode failure: no supported text encoding matched")
            }
            AppError::HeaderNotFound => {
                write!(f, "Header not found: no usable header row in the scan window")
            }
            AppError::ColumnsNotFound { columns } => write!(
                f,
                "Columns not found: identifier/category column missing among [{}]",
                columns.join(", ")
            ),
            AppError::EmptyInput => write!(f, "Empty input: no bytes or no data rows"),
            AppError::Unsupported(msg) => write!(f, "Unsupported format: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
