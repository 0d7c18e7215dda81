//! Dynamically typed chain values.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::assign::Slot;
use crate::capability::{As, Is, Unwrap, Wrap};

mod impls;

/// Upcasting to `Any`.
///
/// Implemented for every sized `Send + Sync + 'static` type, so `Node` implementors get it for
/// free.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// Name of the concrete type, for diagnostics only.
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync> AsAny for T {
    #[inline(always)]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline(always)]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline(always)]
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    #[inline(always)]
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A value that can take part in a chain.
///
/// Capabilities are optional: a node opts into one by returning `Some(self)` from the matching
/// accessor. The defaults make a plain leaf node with no capabilities at all.
pub trait Node: AsAny + fmt::Debug + 'static {
    /// Structural equality with a node of any type.
    ///
    /// Usually implemented with [`deep_eq`]. Identity is checked by `Value` before this is called.
    fn node_eq(&self, other: &dyn Node) -> bool;

    /// Returns `true` if this node is the null representation of a nullable kind.
    fn is_nil(&self) -> bool {
        false
    }

    fn unwrapper(&self) -> Option<&dyn Unwrap> {
        None
    }

    fn matcher(&self) -> Option<&dyn Is> {
        None
    }

    fn converter(&self) -> Option<&dyn As> {
        None
    }

    fn wrapper(&self) -> Option<&dyn Wrap> {
        None
    }

    /// Exposes the node as a writable target for `as_value`.
    fn slot(&self) -> Option<&dyn Slot> {
        None
    }
}

/// `PartialEq` between `this` and `other`, or `false` if `other` is a different type.
pub fn deep_eq<T: Node + PartialEq>(this: &T, other: &dyn Node) -> bool {
    AsAny::as_any(other).downcast_ref::<T>()
                        .map_or(false, |other| this == other)
}

/// A shared, dynamically typed value.
///
/// Either the untyped nil, or a reference-counted `Node`. Cloning is cheap and preserves
/// identity.
#[derive(Clone, Default)]
pub struct Value(Option<Arc<dyn Node>>);

impl Value {
    /// The untyped nil.
    pub const fn nil() -> Self {
        Value(None)
    }

    pub fn new<T: Node>(node: T) -> Self {
        Value(Some(Arc::new(node)))
    }

    pub fn from_arc<T: Node>(node: Arc<T>) -> Self {
        Value(Some(node))
    }

    /// Gets the node, if this isn't the untyped nil.
    ///
    /// Unlike [`value_of`] a typed nil is still returned.
    pub fn node(&self) -> Option<&dyn Node> {
        self.0.as_deref()
    }

    pub fn is_nil(&self) -> bool {
        is_nil(self)
    }

    /// The declared type of the value; `None` for the untyped nil.
    pub fn node_type(&self) -> Option<TypeId> {
        self.node().map(|node| <dyn Any>::type_id(AsAny::as_any(node)))
    }

    pub fn type_name(&self) -> &'static str {
        self.node().map_or("nil", |node| AsAny::type_name(node))
    }

    pub fn is<T: Node>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    pub fn downcast_ref<T: Node>(&self) -> Option<&T> {
        self.node().and_then(|node| AsAny::as_any(node).downcast_ref())
    }

    /// Mutably borrows the node, if it's a `T` and isn't shared with any other `Value`.
    pub fn downcast_mut<T: Node>(&mut self) -> Option<&mut T> {
        let node = Arc::get_mut(self.0.as_mut()?)?;
        AsAny::as_any_mut(node).downcast_mut()
    }

    /// Downcasts to a shared reference to the same node.
    pub fn downcast_arc<T: Node>(&self) -> Option<Arc<T>> {
        let node = self.0.as_ref()?;
        AsAny::into_any_arc(Arc::clone(node)).downcast::<T>().ok()
    }

    /// Returns `true` if both values are the same node, or both are the untyped nil.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        match (&this.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Node> From<T> for Value {
    fn from(node: T) -> Self {
        Value::new(node)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.node(), other.node()) {
            (Some(a), Some(b)) => Value::ptr_eq(self, other) || a.node_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.node() {
            Some(node) => fmt::Debug::fmt(node, f),
            None => f.write_str("nil"),
        }
    }
}

/// Returns `true` if `v` is nil: either the untyped nil, or a node that reports itself as the
/// null of a nullable kind, such as `None::<Vec<T>>`.
pub fn is_nil(v: &Value) -> bool {
    value_of(v).is_none()
}

/// Gets the node of `v`, treating every kind of nil as absent.
pub fn value_of(v: &Value) -> Option<&dyn Node> {
    v.node().filter(|node| !node.is_nil())
}
