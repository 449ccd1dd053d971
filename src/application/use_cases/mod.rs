// ============================================================
// USE CASES
// ============================================================

pub mod column_matcher;
pub mod cooccurrence;
pub mod header_resolver;
pub mod name_normalizer;
pub mod processor;
