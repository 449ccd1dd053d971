// ============================================================
// TABULAR INFRASTRUCTURE LAYER
// ============================================================
// Byte-level reading and writing of delimited text and
// spreadsheet files

pub mod reader;
pub mod writer;

pub use reader::{load_rows, FileFormat};
pub use writer::{encode_matrix, encode_table, TOTAL_LABEL};
