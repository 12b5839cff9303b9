//! Compiler-side import hook for grass
//!
//! grass resolves `@import "partials/header"` by trying candidate files
//! (`partials/header.scss`, `partials/_header.scss`, ...) with
//! [`grass::Fs::is_file`] and then reading the first one that exists. Each
//! lookup becomes one call to the bridge; the entries are kept for the rest of
//! the compilation so the following `read` does not ask the host again.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Component, Path};
use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use crate::bridge::Bridge;
use crate::entry::ImportEntry;
use crate::host::Retrieve;

/// A `grass::Fs` that answers every lookup through the host behind a
/// [`Bridge`]. Create one per compilation.
pub struct BridgeFs<'c, R: ?Sized> {
    bridge: Bridge<'c, R>,
    entries: Mutex<IndexMap<String, ImportEntry>>,
}

impl<'c, R: Retrieve + ?Sized> BridgeFs<'c, R> {
    pub fn new(cookie: &'c R) -> Self {
        Self {
            bridge: Bridge::new(cookie),
            entries: Mutex::new(IndexMap::new()),
        }
    }

    /// Look up the entry for `url`, asking the host the first time.
    fn entry(&self, url: &str) -> ImportEntry {
        let mut entries = self.lock();
        if let Some(entry) = entries.get(url) {
            return entry.clone();
        }
        let entry = self.bridge.resolve_import(url).into_entry();
        entries.insert(url.to_owned(), entry.clone());
        entry
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<String, ImportEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// URLs the host resolved, in the order grass first asked for them.
    pub fn resolved(&self) -> Vec<String> {
        self.lock()
            .values()
            .filter(|entry| entry.is_resolved())
            .map(|entry| entry.url().to_owned())
            .collect()
    }

    /// One failed entry per import none of whose candidates resolved.
    ///
    /// grass tries `header.import.scss`, `_header.scss`, `header/index.scss`
    /// and more for a single `@import "header"`; those misses are grouped by
    /// their import stem. A group with any hit is dropped, otherwise the most
    /// telling candidate of the group is kept.
    pub fn unresolved(&self) -> Vec<ImportEntry> {
        let entries = self.lock();
        let resolved: HashSet<String> = entries
            .values()
            .filter(|entry| entry.is_resolved())
            .map(|entry| import_stem(entry.url()))
            .collect();

        let mut failed: IndexMap<String, &ImportEntry> = IndexMap::new();
        for entry in entries.values().filter(|entry| !entry.is_resolved()) {
            let stem = import_stem(entry.url());
            if resolved.contains(&stem) {
                continue;
            }
            match failed.entry(stem) {
                indexmap::map::Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                indexmap::map::Entry::Occupied(mut slot) => {
                    if candidate_rank(entry.url()) < candidate_rank(slot.get().url()) {
                        slot.insert(entry);
                    }
                }
            }
        }

        failed.into_values().cloned().collect()
    }
}

impl<R: Retrieve + ?Sized> grass::Fs for BridgeFs<'_, R> {
    /// Hosts address content, not directories: every path may be one, and
    /// the `index` candidates grass then tries are answered by `is_file`.
    fn is_dir(&self, _path: &Path) -> bool {
        true
    }

    fn is_file(&self, path: &Path) -> bool {
        self.entry(&import_url(path)).is_resolved()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.entry(&import_url(path)) {
            ImportEntry::Resolved { content, .. } => Ok(content.into_bytes()),
            ImportEntry::Failed { message, .. } => {
                Err(io::Error::new(io::ErrorKind::NotFound, message))
            }
        }
    }
}

impl<R: ?Sized> fmt::Debug for BridgeFs<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeFs")
            .field("bridge", &self.bridge)
            .finish_non_exhaustive()
    }
}

/// Turn a path grass looked up into the URL handed to the host: forward
/// slashes, no `./` segments.
pub fn import_url(path: &Path) -> String {
    let mut url = String::new();
    for component in path.components() {
        let part = match component {
            Component::Prefix(prefix) => {
                url.push_str(&prefix.as_os_str().to_string_lossy());
                continue;
            }
            Component::RootDir => {
                url.push('/');
                continue;
            }
            Component::CurDir => continue,
            Component::ParentDir => "..".into(),
            Component::Normal(part) => part.to_string_lossy(),
        };
        if !url.is_empty() && !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(&part);
    }
    url
}

/// Every candidate grass tries for one import shares a stem:
/// `dir/_name.import.scss`, `dir/name.css` and `dir/name/_index.scss` all
/// have the stem `dir/name`.
fn import_stem(url: &str) -> String {
    let (dir, file) = split_file(url);
    let file = file.strip_prefix('_').unwrap_or(file);
    let file = strip_extension(file);
    let file = file.strip_suffix(".import").unwrap_or(file);

    match dir.strip_suffix('/') {
        Some(parent) if file == "index" && !parent.is_empty() => parent.to_owned(),
        _ => format!("{dir}{file}"),
    }
}

/// Lower is better: `name.scss` over `_name.css` over `name.import.sass`.
fn candidate_rank(url: &str) -> u8 {
    let (_, file) = split_file(url);
    let plain = strip_extension(file);
    if plain.ends_with(".import") || plain.trim_start_matches('_') == "index" {
        2
    } else if file.ends_with(".scss") {
        0
    } else {
        1
    }
}

fn split_file(url: &str) -> (&str, &str) {
    match url.rfind('/') {
        Some(slash) => url.split_at(slash + 1),
        None => ("", url),
    }
}

fn strip_extension(file: &str) -> &str {
    [".scss", ".sass", ".css"]
        .iter()
        .find_map(|ext| file.strip_suffix(ext))
        .unwrap_or(file)
}
