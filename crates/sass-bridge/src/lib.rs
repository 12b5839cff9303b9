//! Sass import bridge
//!
//! Routes every `@import` the stylesheet compiler encounters through a
//! retrieval function supplied by the host program, and hands the result back
//! to the compiler as a single import entry.
//!
//! ```text
//! compiler -> BridgeFs -> resolve_import -> Retrieve (host) -> ImportList -> compiler
//! ```
//!
//! The host answers with a status code and an output string. A non-negative
//! status means the output is the imported content, a negative one means the
//! output is an error message. Either way the bridge copies the output into
//! an [`ImportEntry`] that owns its storage, so nothing the compiler keeps
//! points into a host buffer.

pub mod bridge;
pub mod entry;
pub mod error;
pub mod fs;
pub mod host;
pub mod hosts;
pub mod prefix;
pub mod proto;
pub mod render;

pub use bridge::{Bridge, resolve_import};
pub use entry::{ImportEntry, ImportList};
pub use error::RenderError;
pub use fs::BridgeFs;
pub use host::{Retrieval, Retrieve};
pub use hosts::{DirHost, MemoryHost, PrefixRouter};
pub use prefix::{ImportScheme, has_prefix};
pub use proto::{SassInput, SassResult};
pub use render::{CSS_CONTENT_TYPE, OutputStyle, Rendered, SassRenderer};
