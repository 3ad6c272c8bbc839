//! Name derivation
//!
//! Datapackage `name` properties must be lowercase, URL-safe identifiers.
//! They are derived from human-readable titles: accented and non-Latin
//! characters are transliterated to ASCII, then every run of characters
//! outside `[a-z0-9]` collapses into a single hyphen.

use deunicode::deunicode;

/// Separator placed between words of a slug
pub const SEPARATOR: char = '-';

/// Convert `text` into a hyphen-separated, lowercase slug.
///
/// Returns an empty string if `text` has no alphanumeric content.
///
/// ```rust
/// use packager_core::slug::slugify;
///
/// assert_eq!(slugify("My Dataset"), "my-dataset");
/// assert_eq!(slugify("my-dataset"), "my-dataset");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text).to_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    slug
}
