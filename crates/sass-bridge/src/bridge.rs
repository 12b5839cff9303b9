//! The import hook itself

use std::fmt;

use tracing::debug;

use crate::entry::{ImportEntry, ImportList};
use crate::host::Retrieve;

/// Resolve one `@import` by asking the host behind `cookie`.
///
/// Always returns a list with exactly one entry. The host's output is copied
/// (or, when the host handed over an owned string, moved) into the entry, so
/// the result never shares storage with the host. Failures are relayed
/// verbatim: no retry, no classification, no URL validation.
pub fn resolve_import<R: Retrieve + ?Sized>(url: &str, cookie: &R) -> ImportList {
    let retrieval = cookie.retrieve(url);

    let entry = if retrieval.is_success() {
        debug!(url, bytes = retrieval.output.len(), "import resolved");
        ImportEntry::Resolved {
            url: url.to_owned(),
            content: retrieval.output.into_owned(),
        }
    } else {
        debug!(url, status = retrieval.status, error = %retrieval.output, "import failed");
        ImportEntry::Failed {
            url: url.to_owned(),
            message: retrieval.output.into_owned(),
        }
    };

    ImportList::new(entry)
}

/// An import hook registration: the cookie the compiler hands back on every
/// invocation.
pub struct Bridge<'c, R: ?Sized> {
    cookie: &'c R,
}

impl<'c, R: Retrieve + ?Sized> Bridge<'c, R> {
    pub fn new(cookie: &'c R) -> Self {
        Self { cookie }
    }

    /// The caller-supplied context this hook was registered with
    pub fn cookie(&self) -> &'c R {
        self.cookie
    }

    pub fn resolve_import(&self, url: &str) -> ImportList {
        resolve_import(url, self.cookie)
    }
}

impl<R: ?Sized> Clone for Bridge<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for Bridge<'_, R> {}

impl<R: ?Sized> fmt::Debug for Bridge<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::cell::Cell;

    use super::*;
    use crate::host::Retrieval;

    /// Lends its own buffer to the bridge, like a host that reuses one
    /// scratch string for every answer.
    struct BufferHost {
        status: i32,
        buffer: String,
        calls: Cell<usize>,
    }

    impl BufferHost {
        fn new(status: i32, buffer: &str) -> Self {
            Self {
                status,
                buffer: buffer.to_string(),
                calls: Cell::new(0),
            }
        }
    }

    impl Retrieve for BufferHost {
        fn retrieve(&self, _url: &str) -> Retrieval<'_> {
            self.calls.set(self.calls.get() + 1);
            Retrieval::new(self.status, Cow::Borrowed(self.buffer.as_str()))
        }
    }

    #[test]
    fn test_resolved_entry_outlives_host_buffer() {
        let mut host = BufferHost::new(0, "body{color:red}");
        let list = resolve_import("partials/_header.scss", &host);

        host.buffer.clear();
        host.buffer.push_str("overwritten");
        drop(host);

        assert_eq!(list.len(), 1);
        assert_eq!(
            list.first(),
            &ImportEntry::resolved("partials/_header.scss", "body{color:red}")
        );
    }

    #[test]
    fn test_failed_entry_outlives_host_buffer() {
        let mut host = BufferHost::new(-1, "file not found: missing.scss");
        let list = resolve_import("missing.scss", &host);

        host.buffer.replace_range(.., "something else");
        drop(host);

        let entry = list.into_entry();
        assert_eq!(entry.url(), "missing.scss");
        assert_eq!(entry.content(), None);
        assert_eq!(entry.error(), Some("file not found: missing.scss"));
    }

    #[test]
    fn test_any_negative_status_fails() {
        let host = BufferHost::new(-17, "boom");
        assert_eq!(
            resolve_import("a.scss", &host).into_entry(),
            ImportEntry::failed("a.scss", "boom")
        );
    }

    #[test]
    fn test_positive_status_succeeds() {
        let host = BufferHost::new(3, "a{}");
        assert!(resolve_import("a.scss", &host).first().is_resolved());
    }

    #[test]
    fn test_empty_content_is_still_resolved() {
        let host = BufferHost::new(0, "");
        let list = resolve_import("empty.scss", &host);
        assert_eq!(list.first().content(), Some(""));
    }

    #[test]
    fn test_host_called_once_per_import() {
        let host = BufferHost::new(0, "a{}");
        let bridge = Bridge::new(&host);
        bridge.resolve_import("a.scss");
        assert_eq!(host.calls.get(), 1);
    }

    #[test]
    fn test_repeated_resolution_is_equal() {
        let host = BufferHost::new(0, "a{b:c}");
        let bridge = Bridge::new(&host);
        let first = bridge.resolve_import("a.scss");
        let second = bridge.resolve_import("a.scss");
        assert_eq!(first, second);
        assert_ne!(
            first.first().content().map(str::as_ptr),
            second.first().content().map(str::as_ptr)
        );
    }

    #[test]
    fn test_cookie_passthrough() {
        let host = BufferHost::new(0, "x");
        let bridge = Bridge::new(&host);
        assert!(std::ptr::eq(bridge.cookie(), &host));
    }

    #[test]
    fn test_trait_object_cookie() {
        let host = BufferHost::new(0, "x");
        let cookie: &dyn Retrieve = &host;
        assert_eq!(resolve_import("x.scss", cookie).len(), 1);
    }
}
