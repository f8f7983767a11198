//! Diacritic folding for phrase matching.
//!
//! Descriptions appear both accented and ASCII-folded. Folding maps the
//! accented Vietnamese letters onto their base letters with a fixed table so
//! both spellings match the same phrases.

use unicode_normalization::UnicodeNormalization;

/// (accented letters, base letter). Both cases are listed.
const FOLD_TABLE: &[(&str, char)] = &[
    ("àáảãạăằắẳẵặâầấẩẫậ", 'a'),
    ("ÀÁẢÃẠĂẰẮẲẴẶÂẦẤẨẪẬ", 'A'),
    ("èéẻẽẹêềếểễệ", 'e'),
    ("ÈÉẺẼẸÊỀẾỂỄỆ", 'E'),
    ("ìíỉĩị", 'i'),
    ("ÌÍỈĨỊ", 'I'),
    ("òóỏõọôồốổỗộơờớởỡợ", 'o'),
    ("ÒÓỎÕỌÔỒỐỔỖỘƠỜỚỞỠỢ", 'O'),
    ("ùúủũụưừứửữự", 'u'),
    ("ÙÚỦŨỤƯỪỨỬỮỰ", 'U'),
    ("ỳýỷỹỵ", 'y'),
    ("ỲÝỶỸỴ", 'Y'),
    ("đ", 'd'),
    ("Đ", 'D'),
];

/// Base letter for an accented letter in the table.
pub fn fold_char(c: char) -> Option<char> {
    if c.is_ascii() {
        return None;
    }
    FOLD_TABLE
        .iter()
        .find(|(accented, _)| accented.contains(c))
        .map(|(_, base)| *base)
}

/// Compose, fold and lowercase.
///
/// Composition first so decomposed input (base letter plus combining marks)
/// hits the table the same way precomposed input does.
pub fn fold(text: &str) -> String {
    text.nfc()
        .map(|c| fold_char(c).unwrap_or(c))
        .collect::<String>()
        .to_lowercase()
}
