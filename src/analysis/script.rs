//! Script classification helpers.
//!
//! Tokenization treats scripts in two ways: space-delimited scripts
//! (Latin, Arabic, Hangul) keep whole words, while scriptio-continua
//! scripts (CJK ideographs, kana, Thai, Lao, Myanmar, Khmer) are emitted
//! one character at a time. The classifiers here are the single source
//! of truth for that distinction.

use crate::analysis::config::LanguageFamily;

/// Check if a character belongs to a script tokenized one character at a
/// time (scriptio continua).
///
/// Hangul syllables are deliberately absent: Korean is space-delimited
/// and Hangul runs stay whole, even inside mixed tokens.
pub fn is_char_level_script(ch: char) -> bool {
    matches!(ch as u32,
        0x4E00..=0x9FFF      // CJK Unified Ideographs
        | 0x3400..=0x4DBF    // CJK Extension A
        | 0x3040..=0x309F    // Hiragana
        | 0x30A0..=0x30FF    // Katakana
        | 0x0E00..=0x0E7F    // Thai
        | 0x0E80..=0x0EFF    // Lao
        | 0x1000..=0x109F    // Myanmar
        | 0x1780..=0x17FF    // Khmer
    )
}

/// Check if a character is a CJK ideograph (Unified or Extension A).
pub fn is_cjk_ideograph(ch: char) -> bool {
    matches!(ch as u32, 0x4E00..=0x9FFF | 0x3400..=0x4DBF)
}

/// Check if a character is a Latin letter (ASCII or extended ranges).
pub fn is_latin_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || matches!(ch as u32, 0x00C0..=0x024F | 0x1E00..=0x1EFF)
}

/// Check if a character belongs to the Arabic script.
pub fn is_arabic(ch: char) -> bool {
    matches!(ch as u32, 0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF)
}

/// Classify a single character into a coarse script family.
pub fn script_family(ch: char) -> LanguageFamily {
    if is_latin_letter(ch) {
        LanguageFamily::Latin
    } else if is_char_level_script(ch) {
        LanguageFamily::Cjk
    } else if is_arabic(ch) {
        LanguageFamily::Arabic
    } else {
        LanguageFamily::Unknown
    }
}

/// Check if a token contains any character-level script characters.
pub fn contains_char_level(token: &str) -> bool {
    token.chars().any(is_char_level_script)
}

/// Check if a token consists entirely of character-level script
/// characters (whitespace permitted).
pub fn is_pure_char_level(token: &str) -> bool {
    token
        .chars()
        .all(|ch| is_char_level_script(ch) || ch.is_whitespace())
}

// Emoji blocks recognized by the postprocess filter.
const EMOJI_RANGES: [(u32, u32); 8] = [
    (0x1F600, 0x1F64F), // Emoticons
    (0x1F300, 0x1F5FF), // Misc Symbols & Pictographs
    (0x1F680, 0x1F6FF), // Transport & Map
    (0x1F1E6, 0x1F1FF), // Regional Indicators
    (0x2600, 0x26FF),   // Misc Symbols
    (0x2700, 0x27BF),   // Dingbats
    (0x1F900, 0x1F9FF), // Supplemental Symbols & Pictographs
    (0x1FA70, 0x1FAFF), // Symbols & Pictographs Extended-A
];

fn is_emoji_codepoint(cp: u32) -> bool {
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// ZWJ, variation selectors, skin-tone modifiers and tag characters that
/// occur inside emoji sequences.
fn is_emoji_modifier(cp: u32) -> bool {
    matches!(cp, 0x200D | 0xFE0E | 0xFE0F)
        || (0x1F3FB..=0x1F3FF).contains(&cp)
        || (0xE0020..=0xE007F).contains(&cp)
}

/// Check if a token is an emoji sequence: every code point falls in a
/// recognized emoji block or is a known sequence modifier.
pub fn is_emoji_sequence(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    token
        .chars()
        .all(|ch| is_emoji_codepoint(ch as u32) || is_emoji_modifier(ch as u32))
}
