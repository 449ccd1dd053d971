pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::column_matcher::ColumnMatcher;
pub use application::use_cases::processor::{
    Engine, ProcessedFile, CLEANED_NAMES_PREFIX, COOCCURRENCE_PREFIX,
};
pub use application::{aggregate, normalize, resolve_header};
pub use domain::{
    AppError, Cell, CleanedTable, CoOccurrenceMatrix, ColumnRoles, EngineConfig, RawTable, Record,
    Result,
};
pub use infrastructure::tabular::{FileFormat, TOTAL_LABEL};
