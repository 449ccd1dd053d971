pub mod use_cases;

pub use use_cases::cooccurrence::aggregate;
pub use use_cases::header_resolver::resolve_header;
pub use use_cases::name_normalizer::normalize;
pub use use_cases::processor::{Engine, ProcessedFile};
