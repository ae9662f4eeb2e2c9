//! Text recovery: repair fields mangled by a UTF-8 → Latin-1 mis-decoding.
//!
//! Names and places arrive from the backend with Arabic script turned into
//! sequences like `Ù…Ø«Ø§Ù„`. Recovery is conservative:
//!
//! 1. Text without any marker character is returned as-is (trimmed).
//! 2. Otherwise each [`Decoding`] proposes a candidate.
//! 3. The candidate with the most Arabic letters wins. The input wins
//!    ties, and candidates carrying U+FFFD are never picked.
//!
//! Decoding clean text unconditionally would double-decode it.

mod candidate;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

pub use candidate::{Candidate, Decoding};

/// The Unicode replacement character.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Characters typical of mojibake and absent from clean text in this domain.
pub const MARKERS: [char; 11] = [
    'Ã', 'Â', 'Ø', 'Ù', 'Ð', '×', '¢', '«', '»', 'ß', REPLACEMENT,
];

/// Recover the best-guess original of a possibly corrupted text value.
///
/// The result is trimmed and, when a decoding was attempted, in NFC.
/// Never fails: at worst the trimmed input comes back unchanged.
pub fn recover(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if !has_marker(trimmed) {
        return trimmed.to_string();
    }

    let mut best_score = arabic_score(trimmed);
    let mut best: Option<Candidate> = None;
    for candidate in Decoding::ALL
        .into_iter()
        .filter_map(|decoding| decoding.candidate(trimmed))
        .filter(Candidate::is_viable)
    {
        if candidate.score > best_score {
            best_score = candidate.score;
            best = Some(candidate);
        }
    }

    match best {
        Some(candidate) => {
            log::debug!(
                "recovered {trimmed:?} with {:?} decoding (score {})",
                candidate.decoding,
                candidate.score
            );
            candidate.text.nfc().collect()
        }
        None => trimmed.nfc().collect(),
    }
}

/// [`recover`] for an optional field. Absent values become `""`.
pub fn recover_field(value: Option<&str>) -> String {
    value.map(recover).unwrap_or_default()
}

/// Whether `text` still looks like mojibake: a marker is present and no
/// Arabic letter is.
///
/// Meant for already-recovered text. A `true` here means recovery didn't
/// help and a caller should fall back to another source for the value.
pub fn looks_corrupted(text: &str) -> bool {
    has_marker(text) && !text.chars().any(is_arabic)
}

/// Whether `text` contains any Arabic-script character.
pub fn is_right_to_left(text: &str) -> bool {
    text.chars().any(is_arabic)
}

/// Whether `text` contains any marker character.
pub fn has_marker(text: &str) -> bool {
    text.contains(MARKERS.as_slice())
}

/// Whether `c` is in the Arabic block (U+0600–U+06FF).
pub fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Number of Arabic-block characters in `text`.
pub fn arabic_score(text: &str) -> usize {
    text.chars().filter(|&c| is_arabic(c)).count()
}

/// Layout direction for displaying a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn of(text: &str) -> Self {
        if is_right_to_left(text) {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }
}
