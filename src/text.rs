/// Caption text cleanup

use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Tags, comments and processing instructions. An unterminated `<` eats
    // the rest of the string, like most tag strippers do.
    PATTERN.get_or_init(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*(?:>|$)").unwrap())
}

/// Remove markup from caption text, keeping the text between tags.
pub fn strip_markup(text: &str) -> String {
    tag_pattern().replace_all(text, "").into_owned()
}
