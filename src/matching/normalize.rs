use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::constants::VENDOR_TAG;

/// `<vendor>_<id>_` numbering prefix, e.g. `pragmatic_1201_`.
static VENDOR_NUMBERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| vendor_regex(r"_\d+_"));
static VENDOR_UNDERSCORE_PREFIX: Lazy<Regex> = Lazy::new(|| vendor_regex("_"));
static VENDOR_SPACE_PREFIX: Lazy<Regex> = Lazy::new(|| vendor_regex(r"\s+"));
static TRAILING_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\d+$").expect("trailing digit pattern is valid"));

fn vendor_regex(separator: &str) -> Regex {
    let pattern = format!("(?i)^{}{}", regex::escape(VENDOR_TAG), separator);
    Regex::new(&pattern).expect("vendor prefix pattern is valid")
}

/// Canonical comparison form of a label: lowercase ASCII letters separated by
/// single spaces, no leading or trailing space.
///
/// Anything that is not a letter a-z or whitespace is dropped outright, so
/// `"Gonzo's Quest™ 2"` becomes `"gonzos quest"`. The result is idempotent.
pub fn normalize(text: &str) -> String {
    let letters: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || is_separator(*c))
        .collect();

    letters
        .split(is_separator)
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word separators: Unicode whitespace minus NEL (U+0085), plus the BOM
/// (U+FEFF).
fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Strips file-specific noise from an artwork file name and normalizes what is
/// left: the extension, the vendor numbering prefix, a bare vendor prefix,
/// underscores and a trailing numeric id.
///
/// ```
/// use slot_image_matcher::matching::clean_file_name;
/// assert_eq!(clean_file_name("pragmatic_1201_sweet_bonanza_1000.png"), "sweet bonanza");
/// ```
pub fn clean_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = VENDOR_NUMBERED_PREFIX.replace(&stem, "");
    let name = VENDOR_UNDERSCORE_PREFIX.replace(&name, "");
    let name = VENDOR_SPACE_PREFIX.replace(&name, "");
    let name = name.replace('_', " ");
    let name = TRAILING_DIGITS.replace(&name, "");

    normalize(&name)
}

/// Catalog names worth echoing to the debug log, since they carry characters
/// normalization throws away.
pub fn has_lossy_characters(name: &str) -> bool {
    name.contains('\'') || name.contains('™')
}
