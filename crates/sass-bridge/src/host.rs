//! The host side of the import contract

use std::borrow::Cow;
use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

/// Status a host returns when it found the content.
pub const STATUS_FOUND: i32 = 0;

/// Status a host returns when it could not produce the content.
pub const STATUS_FAILED: i32 = -1;

/// What a host's retrieval function answered.
///
/// The status and the output always travel together: a non-negative status
/// means `output` is the content, a negative one means it is an error message.
/// `output` may borrow from the host; the bridge copies it before the
/// compiler sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrieval<'a> {
    pub status: i32,
    pub output: Cow<'a, str>,
}

impl<'a> Retrieval<'a> {
    pub fn new(status: i32, output: impl Into<Cow<'a, str>>) -> Self {
        Self {
            status,
            output: output.into(),
        }
    }

    pub fn found(content: impl Into<Cow<'a, str>>) -> Self {
        Self::new(STATUS_FOUND, content)
    }

    pub fn failed(message: impl Into<Cow<'a, str>>) -> Self {
        Self::new(STATUS_FAILED, message)
    }

    pub fn is_success(&self) -> bool {
        self.status >= 0
    }
}

impl<'a, E: Display> From<Result<Cow<'a, str>, E>> for Retrieval<'a> {
    fn from(result: Result<Cow<'a, str>, E>) -> Self {
        match result {
            Ok(content) => Retrieval::found(content),
            Err(e) => Retrieval::failed(e.to_string()),
        }
    }
}

/// A host's path-retrieval routine.
///
/// The value implementing this trait is the "cookie" the compiler threads
/// through to the import hook. The bridge never looks inside it; it only
/// calls [`Retrieve::retrieve`]. Calls are synchronous: the compiler waits
/// for the answer before continuing through the import graph.
pub trait Retrieve {
    fn retrieve(&self, url: &str) -> Retrieval<'_>;
}

impl<T: Retrieve + ?Sized> Retrieve for &T {
    fn retrieve(&self, url: &str) -> Retrieval<'_> {
        (**self).retrieve(url)
    }
}

impl<T: Retrieve + ?Sized> Retrieve for Box<T> {
    fn retrieve(&self, url: &str) -> Retrieval<'_> {
        (**self).retrieve(url)
    }
}

impl<T: Retrieve + ?Sized> Retrieve for Rc<T> {
    fn retrieve(&self, url: &str) -> Retrieval<'_> {
        (**self).retrieve(url)
    }
}

impl<T: Retrieve + ?Sized> Retrieve for Arc<T> {
    fn retrieve(&self, url: &str) -> Retrieval<'_> {
        (**self).retrieve(url)
    }
}
