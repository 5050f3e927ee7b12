//! Place-name normalization.
//!
//! Turns free-text place names into comparison keys: case-folded, trimmed
//! and stripped of diacritics. Keys are only ever compared, never shown.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a place name into its comparison key.
///
/// The text is decomposed (NFKD), combining marks are dropped, every
/// remaining character is lower-cased and surrounding whitespace is
/// trimmed. Punctuation, digits and inner whitespace pass through.
///
/// This is a pure, total function: the same input always yields the same
/// key and the empty string maps to the empty string.
///
/// # Examples
///
/// ```
/// use tariff_lookup::normalize::normalize;
///
/// assert_eq!(normalize("  Córdoba "), "cordoba");
/// assert_eq!(normalize("JESÚS MARÍA"), "jesus maria");
/// assert_eq!(normalize("Villa Carlos Paz (Km 3)"), "villa carlos paz (km 3)");
/// ```
pub fn normalize(text: &str) -> String {
    let key: String = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    // Compatibility decomposition can expose whitespace (e.g. a lone
    // spacing accent), so trim after decomposing.
    key.trim().to_string()
}
