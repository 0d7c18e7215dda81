//! Optional node capabilities.
//!
//! A node type can implement any subset of these, and exposes the ones it implements through the
//! accessors on [`Node`](crate::Node).

use std::fmt;
use std::marker::PhantomData;

use crate::assign::{Assign, Target};
use crate::value::{Node, Value};

/// Exposes the predecessor of a node.
pub trait Unwrap {
    /// Returns the wrapped value, or `None` if this is the last node of the chain.
    ///
    /// Note that `Some(Value::nil())` is a present predecessor that happens to be nil.
    fn unwrap(&self) -> Option<Value>;
}

/// Custom equality, tried by `is` before structural equality.
pub trait Is {
    fn is_equal(&self, target: &Value) -> bool;
}

/// Custom conversion, tried by `as_` when the node itself isn't assignable to the target.
pub trait As {
    /// Tries to convert into `target`.
    ///
    /// If `true` is returned the target must have been written; if `false` is returned it must
    /// be left unmodified.
    fn as_convert(&self, target: &mut Target<'_>) -> bool;
}

/// Accepts a predecessor, making the node a chain node in its own right.
pub trait Wrap {
    /// Returns `false` to reject the predecessor, in which case `build` wraps the node in a link
    /// instead.
    fn wrap(&self, predecessor: &Value) -> bool;
}

/// One of the capability traits, as a type.
///
/// Implemented for `dyn Unwrap`, `dyn Is`, `dyn As` and `dyn Wrap`.
pub trait Capability: 'static {
    /// Returns `true` if `node` has this capability.
    fn present(node: &dyn Node) -> bool;
}

impl Capability for dyn Unwrap {
    fn present(node: &dyn Node) -> bool {
        node.unwrapper().is_some()
    }
}

impl Capability for dyn Is {
    fn present(node: &dyn Node) -> bool {
        node.matcher().is_some()
    }
}

impl Capability for dyn As {
    fn present(node: &dyn Node) -> bool {
        node.converter().is_some()
    }
}

impl Capability for dyn Wrap {
    fn present(node: &dyn Node) -> bool {
        node.wrapper().is_some()
    }
}

/// A node known to have capability `C`.
///
/// `Option<Has<C>>` is the slot type for "any node implementing `C`": `as_` fills it with the
/// first node in the chain that has the capability, whatever its concrete type.
///
/// ```
/// use chain::{as_, Has, Unwrap, Value};
///
/// let c = chain::chain!["a", "b"];
///
/// let mut unwrapper: Option<Has<dyn Unwrap>> = None;
/// assert!(as_(&c, &mut unwrapper));
/// assert_eq!(unwrapper.unwrap().unwrap(), Some(Value::from("a")));
/// ```
pub struct Has<C: ?Sized> {
    value: Value,
    capability: PhantomData<fn(&C)>,
}

impl<C: ?Sized + Capability> Has<C> {
    /// Returns `None` if `value` doesn't have the capability.
    pub fn new(value: Value) -> Option<Self> {
        if value.node().map_or(false, C::present) {
            Some(Has { value, capability: PhantomData })
        } else {
            None
        }
    }

    /// The node, sharing identity with the one in the chain.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl<C: ?Sized> Clone for Has<C> {
    fn clone(&self) -> Self {
        Has { value: self.value.clone(), capability: PhantomData }
    }
}

impl<C: ?Sized> fmt::Debug for Has<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Has")
            .field(&self.value)
            .finish()
    }
}

impl<C: ?Sized + Capability> Assign for Option<Has<C>> {
    fn assign_from(node: &Value) -> Option<Self> {
        Has::new(node.clone()).map(Some)
    }

    fn assignable_from(node: &Value) -> bool {
        node.node().map_or(false, C::present)
    }
}

impl Unwrap for Has<dyn Unwrap> {
    fn unwrap(&self) -> Option<Value> {
        self.value.node()?.unwrapper()?.unwrap()
    }
}

impl Is for Has<dyn Is> {
    fn is_equal(&self, target: &Value) -> bool {
        self.value.node()
            .and_then(|node| node.matcher())
            .map_or(false, |matcher| matcher.is_equal(target))
    }
}

impl As for Has<dyn As> {
    fn as_convert(&self, target: &mut Target<'_>) -> bool {
        self.value.node()
            .and_then(|node| node.converter())
            .map_or(false, |converter| converter.as_convert(target))
    }
}

impl Wrap for Has<dyn Wrap> {
    fn wrap(&self, predecessor: &Value) -> bool {
        self.value.node()
            .and_then(|node| node.wrapper())
            .map_or(false, |wrapper| wrapper.wrap(predecessor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Link;

    #[test]
    fn has_requires_capability() {
        assert!(Has::<dyn Unwrap>::new(Value::from(1u8)).is_none());
        assert!(Has::<dyn Unwrap>::new(Value::nil()).is_none());

        let link = Value::new(Link::new().set(1u8));
        let has = Has::<dyn Is>::new(link.clone()).unwrap();
        assert!(Value::ptr_eq(has.value(), &link));
        assert!(has.is_equal(&Value::from(1u8)));
        assert!(!has.is_equal(&Value::from(2u8)));
    }

    #[test]
    fn has_delegates() {
        let link = Value::new(Link::new());
        let wrapper = Has::<dyn Wrap>::new(link.clone()).unwrap();
        assert!(wrapper.wrap(&Value::from("prev")));

        let unwrapper = Has::<dyn Unwrap>::new(link).unwrap();
        assert_eq!(unwrapper.unwrap(), Some(Value::from("prev")));
    }

    #[test]
    fn option_has_slot() {
        assert!(<Option<Has<dyn As>>>::assignable_from(&Value::new(Link::new())));
        assert!(!<Option<Has<dyn As>>>::assignable_from(&Value::from("x")));
        assert!(!<Option<Has<dyn As>>>::assignable_from(&Value::nil()));
    }
}
