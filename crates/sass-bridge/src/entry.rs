//! Import entries handed back to the compiler
//!
//! Entries own their strings. Nothing in here borrows from the host that
//! produced the content, so an entry stays valid after the host reuses or
//! drops its buffers.

/// The outcome of resolving one `@import`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEntry {
    /// The host found content for the URL
    Resolved { url: String, content: String },
    /// The host reported a failure
    Failed { url: String, message: String },
}

impl ImportEntry {
    pub fn resolved(url: impl Into<String>, content: impl Into<String>) -> Self {
        ImportEntry::Resolved {
            url: url.into(),
            content: content.into(),
        }
    }

    pub fn failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        ImportEntry::Failed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// The URL exactly as the compiler asked for it
    pub fn url(&self) -> &str {
        match self {
            ImportEntry::Resolved { url, .. } | ImportEntry::Failed { url, .. } => url,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            ImportEntry::Resolved { content, .. } => Some(content),
            ImportEntry::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ImportEntry::Resolved { .. } => None,
            ImportEntry::Failed { message, .. } => Some(message),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ImportEntry::Resolved { .. })
    }
}

/// The list an import hook returns.
///
/// A single-file import hook never expands one import into several files, so
/// the list always holds exactly one entry. The type enforces it: there is no
/// way to build an empty or multi-entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportList {
    entry: ImportEntry,
}

impl ImportList {
    pub fn new(entry: ImportEntry) -> Self {
        Self { entry }
    }

    /// Always 1
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[ImportEntry] {
        std::slice::from_ref(&self.entry)
    }

    pub fn first(&self) -> &ImportEntry {
        &self.entry
    }

    pub fn into_entry(self) -> ImportEntry {
        self.entry
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImportEntry> {
        self.as_slice().iter()
    }
}

impl IntoIterator for ImportList {
    type Item = ImportEntry;
    type IntoIter = std::iter::Once<ImportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self.entry)
    }
}

impl<'a> IntoIterator for &'a ImportList {
    type Item = &'a ImportEntry;
    type IntoIter = std::slice::Iter<'a, ImportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_accessors() {
        let entry = ImportEntry::resolved("a.scss", "a{b:c}");
        assert_eq!(entry.url(), "a.scss");
        assert_eq!(entry.content(), Some("a{b:c}"));
        assert_eq!(entry.error(), None);
        assert!(entry.is_resolved());
    }

    #[test]
    fn test_failed_accessors() {
        let entry = ImportEntry::failed("a.scss", "nope");
        assert_eq!(entry.url(), "a.scss");
        assert_eq!(entry.content(), None);
        assert_eq!(entry.error(), Some("nope"));
        assert!(!entry.is_resolved());
    }

    #[test]
    fn test_list_holds_one_entry() {
        let list = ImportList::new(ImportEntry::failed("x", "y"));
        assert_eq!(list.len(), 1);
        assert!(!list.is_empty());
        assert_eq!(list.iter().count(), 1);
        assert_eq!((&list).into_iter().count(), 1);
        assert_eq!(list.into_iter().count(), 1);
    }
}
