//! Stylesheet rendering through the import bridge

use std::str::FromStr;

use camino::Utf8PathBuf;
use tracing::{info, warn};

use crate::error::{RenderError, UnknownStyle};
use crate::fs::BridgeFs;
use crate::host::Retrieve;
use crate::hosts::MemoryHost;
use crate::proto::{SassInput, SassResult};

/// Content type of rendered stylesheets
pub const CSS_CONTENT_TYPE: &str = "text/css; charset=utf-8";

/// Entry point of a [`SassInput`]
pub const ENTRY_FILE: &str = "main.scss";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    #[default]
    Expanded,
    Compressed,
}

impl FromStr for OutputStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expanded" => Ok(OutputStyle::Expanded),
            "compressed" => Ok(OutputStyle::Compressed),
            other => Err(UnknownStyle(other.to_string())),
        }
    }
}

impl From<OutputStyle> for grass::OutputStyle {
    fn from(style: OutputStyle) -> Self {
        match style {
            OutputStyle::Expanded => grass::OutputStyle::Expanded,
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
        }
    }
}

/// A compiled stylesheet
#[derive(Debug, Clone)]
pub struct Rendered {
    pub css: String,
    /// URLs the host resolved while compiling, in request order
    pub imports: Vec<String>,
}

impl Rendered {
    pub fn content_type(&self) -> &'static str {
        CSS_CONTENT_TYPE
    }
}

/// Compiles SCSS with grass, resolving every import through a host.
#[derive(Debug, Clone, Default)]
pub struct SassRenderer {
    style: OutputStyle,
    load_paths: Vec<Utf8PathBuf>,
}

impl SassRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// Extra directories grass searches when an import is not found next to
    /// the importing stylesheet. Candidates under them are still fetched
    /// through the host.
    pub fn load_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.load_paths.push(path.into());
        self
    }

    /// Compile `source`. Relative imports resolve against the host root.
    pub fn render<R: Retrieve + ?Sized>(
        &self,
        source: &str,
        host: &R,
    ) -> Result<Rendered, RenderError> {
        self.compile(host, |options| grass::from_string(source.to_owned(), options))
    }

    /// Fetch the stylesheet at `url` from the host and compile it. Relative
    /// imports resolve against the directory of `url`.
    pub fn render_url<R: Retrieve + ?Sized>(
        &self,
        url: &str,
        host: &R,
    ) -> Result<Rendered, RenderError> {
        self.compile(host, |options| grass::from_path(url, options))
    }

    /// Compile an in-memory file set with [`ENTRY_FILE`] as the entry.
    pub fn render_files(&self, input: &SassInput) -> SassResult {
        let host: MemoryHost = input
            .files
            .iter()
            .map(|(name, content)| (name.clone(), content.clone()))
            .collect();

        if host.get(ENTRY_FILE).is_none() {
            return SassResult::Error {
                message: RenderError::MissingEntry(ENTRY_FILE.to_string()).to_string(),
            };
        }

        match self.render_url(ENTRY_FILE, &host) {
            Ok(rendered) => SassResult::Success { css: rendered.css },
            Err(e) => SassResult::Error {
                message: e.to_string(),
            },
        }
    }

    fn compile<R, F>(&self, host: &R, run: F) -> Result<Rendered, RenderError>
    where
        R: Retrieve + ?Sized,
        F: FnOnce(&grass::Options<'_>) -> Result<String, Box<grass::Error>>,
    {
        let fs = BridgeFs::new(host);
        let mut options = grass::Options::default().style(self.style.into()).fs(&fs);
        for path in &self.load_paths {
            options = options.load_path(path.as_std_path());
        }

        match run(&options) {
            Ok(css) => {
                let imports = fs.resolved();
                info!(imports = imports.len(), bytes = css.len(), "stylesheet rendered");
                Ok(Rendered { css, imports })
            }
            Err(e) => {
                let failed_imports = fs.unresolved();
                for entry in &failed_imports {
                    warn!(url = entry.url(), error = entry.error(), "sass import failed");
                }
                Err(RenderError::Compile {
                    message: e.to_string(),
                    failed_imports,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style() {
        assert_eq!("expanded".parse(), Ok(OutputStyle::Expanded));
        assert_eq!("compressed".parse(), Ok(OutputStyle::Compressed));
        assert_eq!(
            "nested".parse::<OutputStyle>(),
            Err(UnknownStyle("nested".to_string()))
        );
    }

    #[test]
    fn test_default_style_is_expanded() {
        assert_eq!(OutputStyle::default(), OutputStyle::Expanded);
    }

    #[test]
    fn test_render_files_requires_entry() {
        let input = SassInput::default();
        assert_eq!(
            SassRenderer::new().render_files(&input),
            SassResult::Error {
                message: "main.scss not found in files".to_string()
            }
        );
    }
}
