//! Assignability of nodes into typed slots.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::value::{Node, Value};

/// A type that chain nodes can be assigned into.
pub trait Assign: Any + Sized {
    /// Converts `node` into `Self`, or `None` if the node's type isn't assignable.
    fn assign_from(node: &Value) -> Option<Self>;

    fn assignable_from(node: &Value) -> bool {
        Self::assign_from(node).is_some()
    }
}

/// Every typed node is assignable to `Value`; the untyped nil has no type, and isn't.
impl Assign for Value {
    fn assign_from(node: &Value) -> Option<Self> {
        node.node().map(|_| node.clone())
    }

    fn assignable_from(node: &Value) -> bool {
        node.node().is_some()
    }
}

/// Assigns the node itself, sharing it rather than cloning it.
impl<T: Node> Assign for Option<Arc<T>> {
    fn assign_from(node: &Value) -> Option<Self> {
        node.downcast_arc::<T>().map(Some)
    }

    fn assignable_from(node: &Value) -> bool {
        node.is::<T>()
    }
}

/// Describes the type of a slot, and which nodes can be assigned to it.
#[derive(Clone, Copy)]
pub struct TypeExample {
    id: TypeId,
    name: &'static str,
    assignable: fn(&Value) -> bool,
}

impl TypeExample {
    pub fn of<T: Assign>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            assignable: T::assignable_from,
        }
    }

    /// Makes the `TypeExample` of the value `example` points to.
    pub fn from_example<T: Assign>(_example: &T) -> Self {
        Self::of::<T>()
    }

    /// The slot type, not the type of the reference to it.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.name
    }

    pub fn assignable_from(&self, node: &Value) -> bool {
        (self.assignable)(node)
    }
}

impl fmt::Debug for TypeExample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("TypeExample")
            .field(&self.name)
            .finish()
    }
}

impl PartialEq for TypeExample {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for TypeExample {}

/// A mutable borrow of a slot of some `Assign` type.
///
/// This is what `As` implementations get to write into.
pub struct Target<'a> {
    slot: &'a mut dyn Any,
    example: TypeExample,
    assign: fn(&mut dyn Any, &Value) -> bool,
}

impl<'a> Target<'a> {
    pub fn new<T: Assign>(slot: &'a mut T) -> Self {
        Self {
            example: TypeExample::from_example(&*slot),
            slot,
            assign: assign_erased::<T>,
        }
    }

    pub fn example(&self) -> &TypeExample {
        &self.example
    }

    pub fn is<T: Any>(&self) -> bool {
        self.slot.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.slot.downcast_ref()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.slot.downcast_mut()
    }

    /// Writes `node` into the slot if it's assignable, returning whether it was.
    pub fn assign(&mut self, node: &Value) -> bool {
        (self.assign)(&mut *self.slot, node)
    }
}

impl fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Target")
            .field("example", &self.example)
            .finish()
    }
}

fn assign_erased<T: Assign>(slot: &mut dyn Any, node: &Value) -> bool {
    match (slot.downcast_mut::<T>(), T::assign_from(node)) {
        (Some(slot), Some(value)) => {
            *slot = value;
            true
        },
        _ => false,
    }
}

/// A node that can be written through by `as_value`.
pub trait Slot {
    /// Runs `f` with a target borrowing the slot's contents.
    fn with_target(&self, f: &mut dyn FnMut(&mut Target<'_>) -> bool) -> bool;
}

/// A shareable, writable slot.
///
/// Wrapped in a `Value`, this is the dynamically typed equivalent of passing `&mut T` to `as_`.
#[derive(Default)]
pub struct Ptr<T> {
    cell: RwLock<T>,
}

impl<T> Ptr<T> {
    pub fn new(value: T) -> Self {
        Self { cell: RwLock::new(value) }
    }

    pub fn get(&self) -> T
        where T: Clone
    {
        self.cell.read().clone()
    }

    pub fn into_inner(self) -> T {
        self.cell.into_inner()
    }
}

impl<T: fmt::Debug> fmt::Debug for Ptr<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = self.cell.read();
        f.debug_tuple("Ptr")
            .field(&*value)
            .finish()
    }
}

impl<T: Assign + Send + Sync> Slot for Ptr<T> {
    fn with_target(&self, f: &mut dyn FnMut(&mut Target<'_>) -> bool) -> bool {
        let mut value = self.cell.write();
        f(&mut Target::new(&mut *value))
    }
}

/// Pointers only compare equal by identity.
impl<T: Assign + Send + Sync + fmt::Debug> Node for Ptr<T> {
    fn node_eq(&self, _other: &dyn Node) -> bool {
        false
    }

    fn slot(&self) -> Option<&dyn Slot> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_describes_slot_type() {
        let s = String::new();
        let ex = TypeExample::from_example(&s);
        assert_eq!(ex.type_id(), TypeId::of::<String>());
        assert_eq!(ex, TypeExample::of::<String>());
        assert_ne!(ex, TypeExample::of::<&'static str>());

        assert!(ex.assignable_from(&Value::from(String::from("x"))));
        assert!(!ex.assignable_from(&Value::from("x")));
        assert!(!ex.assignable_from(&Value::nil()));
    }

    #[test]
    fn value_slot_takes_anything_typed() {
        let ex = TypeExample::of::<Value>();
        assert!(ex.assignable_from(&Value::from(1u8)));
        assert!(ex.assignable_from(&Value::new(None::<u8>)));
        assert!(!ex.assignable_from(&Value::nil()));
    }

    #[test]
    fn arc_slot_shares_node() {
        let v = Value::new(7u64);
        let mut slot: Option<Arc<u64>> = None;
        let mut target = Target::new(&mut slot);

        assert!(!target.assign(&Value::new(7u32)));
        assert!(target.assign(&v));
        drop(target);

        let arc = slot.unwrap();
        assert!(Value::ptr_eq(&v, &Value::from_arc(arc)));
    }

    #[test]
    fn failed_assign_leaves_slot_alone() {
        let mut slot = String::from("sentinel");
        let mut target = Target::new(&mut slot);
        assert!(target.is::<String>());
        assert!(!target.is::<&'static str>());
        assert!(!target.assign(&Value::from("other")));
        assert_eq!(target.downcast_ref::<String>().map(String::as_str), Some("sentinel"));
        drop(target);
        assert_eq!(slot, "sentinel");
    }

    #[test]
    fn ptr_slot() {
        let ptr = Ptr::new(0i32);
        assert!(ptr.with_target(&mut |target| target.assign(&Value::from(5i32))));
        assert_eq!(ptr.get(), 5);
        assert!(!ptr.with_target(&mut |target| target.assign(&Value::from(6u32))));
        assert_eq!(ptr.into_inner(), 5);
    }
}
