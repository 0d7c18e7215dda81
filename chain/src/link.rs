//! Generic chainable wrapper.

use std::ptr;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::assign::Target;
use crate::capability::{As, Is, Unwrap, Wrap};
use crate::holder::Holder;
use crate::value::{deep_eq, Node, Value};

/// Chainable wrapper for any value.
///
/// A link *holds* one value and *wraps* another. For `is` and `as_` the link stands in for the
/// held value; for traversal it leads to the wrapped one.
#[derive(Debug, Default)]
pub struct Link {
    wrapped: RwLock<Holder>,
    held: Value,
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the held value.
    pub fn set(mut self, held: impl Into<Value>) -> Self {
        self.held = held.into();
        self
    }

    pub fn held(&self) -> &Value {
        &self.held
    }

    fn wrapped(&self) -> RwLockReadGuard<'_, Holder> {
        self.wrapped.read()
    }

    fn take_wrapped(&mut self) -> Option<Value> {
        self.wrapped.get_mut().take()
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        // The default drop recurses once per link, and blows the stack on long chains.
        let mut next = self.take_wrapped();
        while let Some(value) = next {
            next = take_predecessor(value);
        }
    }
}

/// Empties `value` if it's a link nothing else refers to, returning its predecessor.
fn take_predecessor(mut value: Value) -> Option<Value> {
    if let Some(BuildLink(link)) = value.downcast_mut::<BuildLink>() {
        return link.take_wrapped();
    }
    value.downcast_mut::<Link>()?.take_wrapped()
}

impl Unwrap for Link {
    fn unwrap(&self) -> Option<Value> {
        self.wrapped().get()
    }
}

impl Wrap for Link {
    /// Always accepts.
    fn wrap(&self, predecessor: &Value) -> bool {
        self.wrapped.write().set(predecessor.clone());
        true
    }
}

impl Is for Link {
    fn is_equal(&self, target: &Value) -> bool {
        self.held == *target
    }
}

impl As for Link {
    fn as_convert(&self, target: &mut Target<'_>) -> bool {
        crate::as_target(&self.held, target)
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
            || (self.held == other.held && *self.wrapped() == *other.wrapped())
    }
}

impl Node for Link {
    fn node_eq(&self, other: &dyn Node) -> bool {
        deep_eq(self, other)
    }

    fn unwrapper(&self) -> Option<&dyn Unwrap> {
        Some(self)
    }

    fn matcher(&self) -> Option<&dyn Is> {
        Some(self)
    }

    fn converter(&self) -> Option<&dyn As> {
        Some(self)
    }

    fn wrapper(&self) -> Option<&dyn Wrap> {
        Some(self)
    }
}

/// The link `build` wraps values in.
///
/// Distinct from `Link` so that links made by `build` never turn up in an `Option<Arc<Link>>`
/// target.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct BuildLink(Link);

impl BuildLink {
    pub(crate) fn new(held: Value) -> Self {
        BuildLink(Link::new().set(held))
    }
}

impl Unwrap for BuildLink {
    fn unwrap(&self) -> Option<Value> {
        self.0.unwrap()
    }
}

impl Wrap for BuildLink {
    fn wrap(&self, predecessor: &Value) -> bool {
        self.0.wrap(predecessor)
    }
}

impl Is for BuildLink {
    fn is_equal(&self, target: &Value) -> bool {
        self.0.is_equal(target)
    }
}

impl As for BuildLink {
    fn as_convert(&self, target: &mut Target<'_>) -> bool {
        self.0.as_convert(target)
    }
}

impl Node for BuildLink {
    fn node_eq(&self, other: &dyn Node) -> bool {
        deep_eq(self, other)
    }

    fn unwrapper(&self) -> Option<&dyn Unwrap> {
        Some(self)
    }

    fn matcher(&self) -> Option<&dyn Is> {
        Some(self)
    }

    fn converter(&self) -> Option<&dyn As> {
        Some(self)
    }

    fn wrapper(&self) -> Option<&dyn Wrap> {
        Some(self)
    }
}
