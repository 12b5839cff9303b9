//! Wire types of [`SassRenderer::render_files`](crate::SassRenderer::render_files)
//!
//! The file map is served through a [`MemoryHost`](crate::MemoryHost), so
//! every import of the set goes through the bridge like any other host's.

use facet::Facet;
use std::collections::HashMap;

/// Outcome of compiling a [`SassInput`]
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
#[repr(u8)]
pub enum SassResult {
    Success { css: String },
    /// Compile failure or missing `main.scss`, rendered as text. Unresolved
    /// imports are listed after the compiler message.
    Error { message: String },
}

/// Stylesheets keyed by import URL.
///
/// `main.scss` is fetched first and compiled as the entry; its imports
/// resolve relative to it, so `@import 'vars'` finds `_vars.scss` and a
/// nested `theme/_dark.scss` is reached as `@import 'theme/dark'`.
#[derive(Debug, Clone, Default, Facet)]
pub struct SassInput {
    pub files: HashMap<String, String>,
}
