//! Alternative decodings of a possibly mis-decoded string.
//!
//! Every decoding reinterprets the string's UTF-16 code units as raw bytes
//! and decodes those bytes as strict UTF-8. When a decoding can't produce
//! bytes, or the bytes aren't valid UTF-8, there is no candidate.

use encoding_rs::{UTF_8, WINDOWS_1252};

use super::{REPLACEMENT, arabic_score};

/// How a candidate's bytes were derived from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoding {
    /// Code points read back as Latin-1 bytes.
    ///
    /// The printable Windows-1252 specials (`€`, `…`, `„`, `”`, …) map to
    /// their single byte. Any other code point above U+00FF means there is
    /// no candidate.
    Latin1,

    /// The low eight bits of every UTF-16 code unit.
    LowByte,

    /// Every code unit written as an unpadded percent escape, unmasked.
    ///
    /// Units above 0xFF produce more hex digits than one escape consumes:
    /// the first two become the byte, the rest pass through as ASCII.
    /// Units up to 0xFF are taken as their byte directly rather than as an
    /// escape, so control characters like `\t` (a one-digit `%9`) survive.
    FullCodeUnit,
}

impl Decoding {
    /// All decodings, in tie-breaking order.
    pub const ALL: [Self; 3] = [Self::Latin1, Self::LowByte, Self::FullCodeUnit];

    /// Decode `text` this way, or `None` if the result isn't valid UTF-8.
    pub fn candidate(self, text: &str) -> Option<Candidate> {
        let bytes = match self {
            Self::Latin1 => latin1_bytes(text)?,
            Self::LowByte => low_byte_bytes(text),
            Self::FullCodeUnit => full_code_unit_bytes(text),
        };

        let decoded = UTF_8
            .decode_without_bom_handling_and_without_replacement(&bytes)?
            .into_owned();

        Some(Candidate {
            decoding: self,
            score: arabic_score(&decoded),
            text: decoded,
        })
    }
}

/// One successfully decoded alternative, scored by Arabic letter count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub decoding: Decoding,
    pub text: String,
    pub score: usize,
}

impl Candidate {
    /// Whether this candidate may be selected at all.
    ///
    /// A candidate carrying U+FFFD is never selected, whatever its score.
    pub fn is_viable(&self) -> bool {
        !self.text.contains(REPLACEMENT)
    }
}

fn latin1_bytes(text: &str) -> Option<Vec<u8>> {
    text.chars().map(latin1_byte).collect()
}

fn latin1_byte(c: char) -> Option<u8> {
    if let Ok(byte) = u8::try_from(u32::from(c)) {
        return Some(byte);
    }

    let mut buf = [0; 4];
    let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
    match (had_errors, &*bytes) {
        (false, &[byte]) => Some(byte),
        _ => None,
    }
}

fn low_byte_bytes(text: &str) -> Vec<u8> {
    text.encode_utf16()
        .map(|unit| unit.to_le_bytes()[0])
        .collect()
}

fn full_code_unit_bytes(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for unit in text.encode_utf16() {
        let [low, high] = unit.to_le_bytes();
        match unit {
            0..=0xFF => bytes.push(low),
            // Three hex digits: `%abc` decodes `ab`, leaves `c`.
            0x100..=0xFFF => {
                let [escaped, _] = (unit >> 4).to_le_bytes();
                bytes.push(escaped);
                bytes.extend(format!("{:x}", unit & 0xF).bytes());
            }
            _ => {
                bytes.push(high);
                bytes.extend(format!("{low:02x}").bytes());
            }
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Latin-1 ──

    #[test]
    fn latin1_decodes_plain_latin1_mojibake() {
        let candidate = Decoding::Latin1.candidate("Ø§").unwrap();
        assert_eq!(candidate.text, "ا");
        assert_eq!(candidate.score, 1);
        assert_eq!(candidate.decoding, Decoding::Latin1);
    }

    #[test]
    fn latin1_maps_windows_1252_specials() {
        // `…` is byte 0x85 and `„` is 0x84 in Windows-1252.
        let candidate = Decoding::Latin1.candidate("Ù…Ù„").unwrap();
        assert_eq!(candidate.text, "مل");
    }

    #[test]
    fn latin1_has_no_candidate_beyond_windows_1252() {
        assert_eq!(Decoding::Latin1.candidate("Øا"), None);
    }

    #[test]
    fn latin1_has_no_candidate_for_invalid_utf8() {
        // A lone lead byte.
        assert_eq!(Decoding::Latin1.candidate("Ã"), None);
    }

    #[test]
    fn latin1_keeps_ascii() {
        let candidate = Decoding::Latin1.candidate("Dubai Port").unwrap();
        assert_eq!(candidate.text, "Dubai Port");
        assert_eq!(candidate.score, 0);
    }

    // ── Low byte ──

    #[test]
    fn low_byte_masks_wide_code_units() {
        // U+01A7 keeps only 0xA7, completing the UTF-8 sequence for `ا`.
        let candidate = Decoding::LowByte.candidate("Ø\u{01A7}").unwrap();
        assert_eq!(candidate.text, "ا");
    }

    #[test]
    fn low_byte_mangles_windows_1252_specials() {
        // `…` is U+2026, so its low byte is `&`, which can't follow 0xD9.
        assert_eq!(Decoding::LowByte.candidate("Ù…"), None);
    }

    // ── Full code unit ──

    #[test]
    fn full_code_unit_splits_four_digit_units() {
        // `%4142` decodes `%41` and leaves `42`.
        let candidate = Decoding::FullCodeUnit.candidate("\u{4142}").unwrap();
        assert_eq!(candidate.text, "A42");
    }

    #[test]
    fn full_code_unit_splits_three_digit_units() {
        // `%627` decodes `%62` and leaves `7`.
        let candidate = Decoding::FullCodeUnit.candidate("\u{0627}").unwrap();
        assert_eq!(candidate.text, "b7");
    }

    #[test]
    fn full_code_unit_matches_latin1_below_0x100() {
        let full = Decoding::FullCodeUnit.candidate("Ø«").unwrap();
        let latin1 = Decoding::Latin1.candidate("Ø«").unwrap();
        assert_eq!(full.text, latin1.text);
    }

    #[test]
    fn full_code_unit_keeps_single_digit_units_as_bytes() {
        let full = Decoding::FullCodeUnit.candidate("Ø«\tÙ\u{85}").unwrap();
        assert_eq!(full.text, "ث\tم");
        assert_eq!(full.score, 2);
    }

    #[test]
    fn full_code_unit_rejects_broken_sequences() {
        assert_eq!(Decoding::FullCodeUnit.candidate("Ø\u{01A7}"), None);
    }

    // ── Viability ──

    #[test]
    fn candidate_with_replacement_character_is_not_viable() {
        // `ï¿½` is the UTF-8 encoding of U+FFFD read as Latin-1.
        let candidate = Decoding::Latin1.candidate("Ø§ï¿½").unwrap();
        assert_eq!(candidate.text, "ا\u{FFFD}");
        assert!(!candidate.is_viable());
    }

    #[test]
    fn clean_candidate_is_viable() {
        let candidate = Decoding::Latin1.candidate("Ø§").unwrap();
        assert!(candidate.is_viable());
    }
}
