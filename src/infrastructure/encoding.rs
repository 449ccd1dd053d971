// ============================================================
// TEXT DECODING
// ============================================================
// Ordered encoding attempts for delimited-text sources

use encoding_rs::{EUC_JP, SHIFT_JIS};
use tracing::debug;

use crate::domain::error::{AppError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode raw bytes as text, trying a fixed list of encodings in order:
/// UTF-8 with BOM, plain UTF-8, Shift_JIS, EUC-JP. The first encoding that
/// decodes without error wins.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    if let Some(stripped) = bytes.strip_prefix(UTF8_BOM) {
        if let Ok(content) = std::str::from_utf8(stripped) {
            return Ok(content.to_string());
        }
    }

    if let Ok(content) = std::str::from_utf8(bytes) {
        return Ok(content.to_string());
    }

    for (name, encoding) in [("shift_jis", SHIFT_JIS), ("euc-jp", EUC_JP)] {
        let (decoded, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            debug!(encoding = name, "decoded legacy-encoded input");
            return Ok(decoded.into_owned());
        }
    }

    Err(AppError::DecodeFailure)
}
