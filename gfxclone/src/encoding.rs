//! Text decoding for game files.
//!
//! Paradox files are usually UTF-8 (sometimes with a BOM) but older ones are
//! `WINDOWS_1252`. Whatever a template was read as, its clone is written back
//! the same way.

use encoding_rs::WINDOWS_1252;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8 { bom: bool },
    Windows1252,
}

impl std::fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceEncoding::Utf8 { bom: true } => f.write_str("UTF-8 (BOM)"),
            SourceEncoding::Utf8 { bom: false } => f.write_str("UTF-8"),
            SourceEncoding::Windows1252 => f.write_str("WINDOWS-1252"),
        }
    }
}

/// Decodes raw file bytes, remembering how to encode them again.
pub fn decode(bytes: &[u8]) -> (String, SourceEncoding) {
    let (body, bom) = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, true),
        None => (bytes, false),
    };

    match std::str::from_utf8(body) {
        Ok(text) => (text.to_string(), SourceEncoding::Utf8 { bom }),
        // Every byte maps to a character, BOM-looking bytes included
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (text.into_owned(), SourceEncoding::Windows1252)
        }
    }
}

/// Encodes text the way it was originally stored.
///
/// Characters WINDOWS_1252 cannot represent become numeric character
/// references, which is what `encoding_rs` does for unmappables.
pub fn encode(text: &str, encoding: SourceEncoding) -> Vec<u8> {
    match encoding {
        SourceEncoding::Utf8 { bom } => {
            let mut out = Vec::with_capacity(text.len() + if bom { 3 } else { 0 });
            if bom {
                out.extend_from_slice(UTF8_BOM);
            }
            out.extend_from_slice(text.as_bytes());
            out
        }
        SourceEncoding::Windows1252 => {
            let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
            if unmappable {
                log::warn!("Some characters could not be represented in WINDOWS-1252");
            }
            bytes.into_owned()
        }
    }
}
