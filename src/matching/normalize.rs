use std::fmt;

/// Comparison key of the form `"<artist> - <title>"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize(title: &str, artist: &str) -> NormalizedKey {
    NormalizedKey(format!(
        "{} - {}",
        normalize_field(artist),
        normalize_field(title),
    ))
}

/// Lower-cases, drops everything but alphanumerics and whitespace, and collapses whitespace.
///
/// Diacritics are kept as-is, so `Björk` and `Bjork` stay different.
pub fn normalize_field(value: &str) -> String {
    let stripped: String = value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
