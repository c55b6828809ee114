pub mod bridge;
pub mod completion;
pub mod image;

use std::fmt;

pub use bridge::{LoadFuture, ResourceLoadBridge};
pub use completion::{CancelToken, Completion};
pub use image::{ImageFetcher, ImageHandle};

/// Opaque identifier of a loadable resource, typically a URL. Not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLocator(String);

impl ResourceLocator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceLocator {
    fn from(locator: &str) -> Self {
        Self::new(locator)
    }
}

impl From<String> for ResourceLocator {
    fn from(locator: String) -> Self {
        Self(locator)
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host primitive that acquires a resource asynchronously.
///
/// Implementations must eventually settle `completion` or drop it; settling
/// more than once is harmless.
pub trait ResourceFetcher {
    type Handle: 'static;

    fn fetch(&self, locator: &ResourceLocator, completion: Completion<Self::Handle>);
}
