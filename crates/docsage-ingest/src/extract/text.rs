//! Plain-text decoding with an ordered encoding fallback.

use std::borrow::Cow;

use docsage_core::{Error, FileType, Result};

/// Candidate encodings for plain-text uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
    Iso88591,
}

/// Fixed preference order: the first encoding that decodes without error wins.
pub const ENCODING_PREFERENCE: &[TextEncoding] = &[
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
    TextEncoding::Iso88591,
];

impl TextEncoding {
    /// Strict decode; `None` on any invalid sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_string)
            }
            Self::Windows1252 => encoding_rs::WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
            // Every byte maps to the code point of the same value.
            Self::Latin1 | Self::Iso88591 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

/// Decode with the first encoding in `order` that succeeds.
pub fn decode_with(bytes: &[u8], order: &[TextEncoding], format: FileType) -> Result<String> {
    order
        .iter()
        .find_map(|enc| enc.decode(bytes))
        .ok_or_else(|| Error::DecodeError {
            format,
            cause: format!("no encoding in {:?} could decode the content", order),
        })
}

/// Strict UTF-8, used by the markup and delimited adapters.
pub fn decode_utf8(bytes: &[u8], format: FileType) -> Result<String> {
    decode_with(bytes, &[TextEncoding::Utf8], format)
}

pub fn extract(bytes: &[u8]) -> Result<String> {
    decode_with(bytes, ENCODING_PREFERENCE, FileType::Text)
}
