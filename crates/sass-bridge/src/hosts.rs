//! Reference hosts
//!
//! How a host turns a URL into content is its own business; these are the
//! simple ones the renderer, the CLI and the tests need.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use crate::host::{Retrieval, Retrieve};
use crate::prefix::{ImportScheme, has_prefix};

/// In-memory host: file name -> content.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    files: HashMap<String, String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for MemoryHost {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl Retrieve for MemoryHost {
    fn retrieve(&self, url: &str) -> Retrieval<'_> {
        // Root-relative imports (`/css/site`) address the same files
        let content = self
            .get(url)
            .or_else(|| self.get(url.trim_start_matches('/')));

        match content {
            Some(content) => Retrieval::found(Cow::Borrowed(content)),
            None => Retrieval::failed(format!("file not found: {url}")),
        }
    }
}

/// Serves files below a root directory.
///
/// Import URLs are taken relative to the root (a leading `/` is ignored) and
/// may not climb out of it.
#[derive(Debug, Clone)]
pub struct DirHost {
    root: Utf8PathBuf,
}

impl DirHost {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, url: &str) -> Result<String, String> {
        match ImportScheme::classify(url) {
            ImportScheme::Relative => {}
            scheme if scheme.is_remote() => {
                return Err(format!("remote imports are not supported: {url}"));
            }
            _ => return Err(format!("unsupported import: {url}")),
        }

        let relative = Utf8Path::new(url.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Utf8Component::Normal(_) | Utf8Component::CurDir));
        if escapes {
            return Err(format!("import escapes root: {url}"));
        }

        fs_err::read_to_string(self.root.join(relative)).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => format!("file not found: {url}"),
            _ => e.to_string(),
        })
    }
}

impl Retrieve for DirHost {
    fn retrieve(&self, url: &str) -> Retrieval<'_> {
        match self.read(url) {
            Ok(content) => Retrieval::found(content),
            Err(message) => Retrieval::failed(message),
        }
    }
}

/// Dispatches imports to other hosts by URL prefix.
///
/// The longest matching prefix wins. The prefix is stripped before the URL is
/// forwarded, so a route `theme/ -> DirHost(themes/dark)` serves
/// `theme/colors.scss` from `themes/dark/colors.scss`.
#[derive(Default)]
pub struct PrefixRouter {
    routes: Vec<(String, Box<dyn Retrieve>)>,
    fallback: Option<Box<dyn Retrieve>>,
}

impl PrefixRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, prefix: impl Into<String>, host: impl Retrieve + 'static) -> Self {
        self.routes.push((prefix.into(), Box::new(host)));
        self.routes.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        self
    }

    /// Host for URLs no route matches
    pub fn fallback(mut self, host: impl Retrieve + 'static) -> Self {
        self.fallback = Some(Box::new(host));
        self
    }
}

impl Retrieve for PrefixRouter {
    fn retrieve(&self, url: &str) -> Retrieval<'_> {
        let route = self
            .routes
            .iter()
            .find(|(prefix, _)| has_prefix(url, prefix));

        match (route, &self.fallback) {
            (Some((prefix, host)), _) => host.retrieve(&url[prefix.len()..]),
            (None, Some(fallback)) => fallback.retrieve(url),
            (None, None) => Retrieval::failed(format!("no route for import: {url}")),
        }
    }
}

impl fmt::Debug for PrefixRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixRouter")
            .field(
                "routes",
                &self.routes.iter().map(|(p, _)| p.as_str()).collect::<Vec<_>>(),
            )
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
