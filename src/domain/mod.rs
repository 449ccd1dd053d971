// ============================================================
// DOMAIN LAYER
// ============================================================
// Core types and value objects for the co-occurrence engine
// No I/O, no external callers

mod config;
mod matrix;
mod table;

pub mod error;

pub use config::{EngineConfig, DEFAULT_CATEGORY_PATTERNS, DEFAULT_ID_PATTERNS};
pub use error::{AppError, Result};
pub use matrix::CoOccurrenceMatrix;
pub use table::{Cell, CleanedTable, ColumnRoles, RawTable, Record};
