//! Import URL classification

/// Returns true when `s` begins with `prefix`.
///
/// An empty prefix matches every string; a prefix longer than `s` never does.
pub fn has_prefix(s: &str, prefix: &str) -> bool {
    let (s, prefix) = (s.as_bytes(), prefix.as_bytes());
    s.len() >= prefix.len() && s[..prefix.len()] == *prefix
}

/// The kind of location an import URL points at, judged by its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportScheme {
    Http,
    Https,
    /// `//host/path`, scheme inherited from the page
    ProtocolRelative,
    File,
    Data,
    /// Anything else: a path relative to the importing stylesheet or root
    Relative,
}

/// Checked in order; `//` must stay after the schemes containing it.
const SCHEMES: &[(&str, ImportScheme)] = &[
    ("https://", ImportScheme::Https),
    ("http://", ImportScheme::Http),
    ("file://", ImportScheme::File),
    ("data:", ImportScheme::Data),
    ("//", ImportScheme::ProtocolRelative),
];

impl ImportScheme {
    pub fn classify(url: &str) -> Self {
        SCHEMES
            .iter()
            .find(|(prefix, _)| has_prefix(url, prefix))
            .map(|(_, scheme)| *scheme)
            .unwrap_or(ImportScheme::Relative)
    }

    /// Whether the URL needs the network to resolve.
    pub fn is_remote(self) -> bool {
        matches!(
            self,
            ImportScheme::Http | ImportScheme::Https | ImportScheme::ProtocolRelative
        )
    }
}
