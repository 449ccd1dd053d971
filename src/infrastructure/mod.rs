// ============================================================
// INFRASTRUCTURE LAYER
// ============================================================
// Encoding detection and tabular byte codecs

pub mod encoding;
pub mod tabular;
