//! Legacy single-byte encoding for archived project files.
//!
//! The panel backend transports archived (zip) project files as text,
//! and the user base's platform historically reads and writes that text
//! with its "ANSI" code page. That is an empirical observation, not a
//! documented contract, so the encoding is configurable through the
//! settings store instead of hard-coded; Windows-1252 is the default.

/// Single-byte encodings the bridge can assume for archived projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyEncoding {
    #[default]
    Windows1252,
    Latin1,
}

/// Windows-1252 mappings for the 0x80..=0x9F range; `\u{FFFD}` marks the
/// five unassigned code points.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{FFFD}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{FFFD}', '\u{017D}', '\u{FFFD}',
    '\u{FFFD}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{FFFD}', '\u{017E}', '\u{0178}',
];

impl LegacyEncoding {
    /// Parse the settings label; `None` for unknown labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "windows-1252" | "cp1252" | "ansi" => Some(LegacyEncoding::Windows1252),
            "latin-1" | "iso-8859-1" => Some(LegacyEncoding::Latin1),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LegacyEncoding::Windows1252 => "windows-1252",
            LegacyEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode raw file bytes into a UTF-8 string. Total: every byte maps
    /// to some character.
    pub fn decode(self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.decode_byte(b)).collect()
    }

    /// Encode text back into single bytes. Characters outside the
    /// encoding become `?`, matching the platform's lossy conversion.
    pub fn encode(self, text: &str) -> Vec<u8> {
        text.chars().map(|c| self.encode_char(c)).collect()
    }

    fn decode_byte(self, byte: u8) -> char {
        match (self, byte) {
            (LegacyEncoding::Windows1252, 0x80..=0x9F) => CP1252_HIGH[(byte - 0x80) as usize],
            // ASCII and 0xA0..=0xFF coincide with the Latin-1 code points
            _ => char::from(byte),
        }
    }

    fn encode_char(self, c: char) -> u8 {
        if c.is_ascii() {
            return c as u8;
        }
        if self == LegacyEncoding::Windows1252 {
            if let Some(index) = CP1252_HIGH.iter().position(|&m| m == c && m != '\u{FFFD}') {
                return 0x80 + index as u8;
            }
        }
        // Latin-1 is total over 0x80..=0xFF; Windows-1252 reassigns the
        // C1 range, so only 0xA0 and up map back directly there.
        match (self, u32::from(c)) {
            (LegacyEncoding::Latin1, code @ 0x80..=0xFF)
            | (LegacyEncoding::Windows1252, code @ 0xA0..=0xFF) => code as u8,
            _ => b'?',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through_both_encodings() {
        for encoding in [LegacyEncoding::Windows1252, LegacyEncoding::Latin1] {
            assert_eq!(encoding.decode(b"PK\x03\x04 project"), "PK\u{3}\u{4} project");
            assert_eq!(encoding.encode("plain ascii"), b"plain ascii");
        }
    }

    #[test]
    fn cp1252_maps_the_high_control_range() {
        let decoded = LegacyEncoding::Windows1252.decode(&[0x80, 0x93, 0x94]);
        assert_eq!(decoded, "\u{20AC}\u{201C}\u{201D}");
    }

    #[test]
    fn latin1_keeps_the_high_range_literal() {
        assert_eq!(LegacyEncoding::Latin1.decode(&[0x80]), "\u{80}");
        assert_eq!(LegacyEncoding::Latin1.decode(&[0xE8]), "è");
    }

    #[test]
    fn cp1252_byte_round_trip() {
        let encoding = LegacyEncoding::Windows1252;
        for byte in 0u8..=255 {
            let decoded = encoding.decode(&[byte]);
            if decoded != "\u{FFFD}" {
                assert_eq!(encoding.encode(&decoded), vec![byte]);
            }
        }
    }

    #[test]
    fn latin1_byte_round_trip_is_total() {
        let encoding = LegacyEncoding::Latin1;
        for byte in 0u8..=255 {
            let decoded = encoding.decode(&[byte]);
            assert_eq!(encoding.encode(&decoded), vec![byte], "byte {byte:#04x}");
        }
    }

    #[test]
    fn unmappable_characters_become_question_marks() {
        assert_eq!(LegacyEncoding::Windows1252.encode("\u{4E16}"), b"?");
    }

    #[test]
    fn labels_parse_back() {
        for encoding in [LegacyEncoding::Windows1252, LegacyEncoding::Latin1] {
            assert_eq!(LegacyEncoding::from_label(encoding.label()), Some(encoding));
        }
        assert_eq!(LegacyEncoding::from_label("utf-16"), None);
    }
}
