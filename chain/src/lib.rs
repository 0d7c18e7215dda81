//! Chains of wrapped values.
//!
//! A generic version of the `Error::source` chain: any value can wrap a predecessor, and the
//! resulting chains can be walked with [`unwrap`] and [`iter`], matched with [`is`], and searched
//! for a node of a given type with [`as_`].
//!
//! What a node can do is up to its type. The capability traits in [`capability`] are all
//! optional, and a node exposes the ones it implements through the accessors on [`Node`].
//! [`build`] chains arbitrary values together, using each value's own `Wrap` implementation if
//! it has one and wrapping it in a link otherwise.
//!
//! Chains are expected to be finite. Nothing here detects cycles, and traversing a cyclic chain
//! never returns.

use log::trace;

#[macro_use]
mod macros;

pub mod value;
pub use self::value::{AsAny, Node, Value, deep_eq, is_nil, value_of};

pub mod capability;
pub use self::capability::{As, Capability, Has, Is, Unwrap, Wrap};

pub mod assign;
pub use self::assign::{Assign, Ptr, Slot, Target, TypeExample};

mod holder;
pub use self::holder::Holder;

mod link;
pub use self::link::Link;
use self::link::BuildLink;

mod iter;
pub use self::iter::Iter;

mod error;
pub use self::error::Error;

use static_assertions::{assert_impl_all, assert_obj_safe};

assert_impl_all!(Value: Send, Sync, Clone, Default);
assert_impl_all!(Link: Node, Send, Sync);
assert_impl_all!(Holder: Send, Sync, Clone);
assert_impl_all!(Has<dyn Unwrap>: Send, Sync, Clone);
assert_obj_safe!(Node, Unwrap, Is, As, Wrap, Slot);

/// Gets the predecessor of `v`.
///
/// Returns `None` if `v` has no `Unwrap` capability, or if it does and has no predecessor.
pub fn unwrap(v: &Value) -> Option<Value> {
    v.node()?.unwrapper()?.unwrap()
}

/// Iterates over `v` and its predecessors.
pub fn iter(v: &Value) -> Iter {
    Iter::new(v.clone())
}

/// Reports whether any node in `v`'s chain matches `target`.
///
/// A node matches if its `Is` capability says so, or if it is equal to `target`. If a nil node is
/// reached while `target` is nil, the answer is whether the two nils have the same type, and the
/// search ends there.
pub fn is(v: &Value, target: &Value) -> bool {
    let target_is_nil = target.is_nil();

    for node in iter(v) {
        if target_is_nil && node.is_nil() {
            return node.node_type() == target.node_type();
        }

        if let Some(matcher) = node.node().and_then(|node| node.matcher()) {
            if matcher.is_equal(target) {
                trace!("is: {} matched {:?} by Is", node.type_name(), target);
                return true;
            }
        }

        if node == *target {
            trace!("is: {} equal to {:?}", node.type_name(), target);
            return true;
        }
    }
    false
}

/// Finds the first node in `v`'s chain that can be assigned to `target`, and assigns it.
///
/// A node can be assigned if its type is assignable to `T`, or if its `As` capability converts
/// it. Returns `false`, leaving `target` as it was, if no such node exists.
pub fn as_<T: Assign>(v: &Value, target: &mut T) -> bool {
    as_target(v, &mut Target::new(target))
}

/// Type-erased version of [`as_`], for use by `As` implementations.
pub fn as_target(v: &Value, target: &mut Target<'_>) -> bool {
    for node in iter(v) {
        if target.example().assignable_from(&node) && target.assign(&node) {
            trace!("as: assigned {} to {}", node.type_name(), target.example().type_name());
            return true;
        }

        if let Some(converter) = node.node().and_then(|node| node.converter()) {
            if converter.as_convert(target) {
                trace!("as: {} converted to {}", node.type_name(), target.example().type_name());
                return true;
            }
        }
    }
    false
}

/// [`as_`] with a dynamically typed target.
///
/// `target` must be a non-nil pointer, that is a node with the `Slot` capability such as a
/// [`Ptr`].
///
/// # Panics
///
/// Panics if `target` is nil or isn't a pointer.
pub fn as_value(v: &Value, target: &Value) -> bool {
    match try_as_value(v, target) {
        Ok(found) => found,
        Err(err) => panic!("{}", err),
    }
}

/// Like [`as_value`], but returns contract violations as errors.
pub fn try_as_value(v: &Value, target: &Value) -> Result<bool, Error> {
    let node = value_of(target).ok_or(Error::NilTarget)?;
    let slot = node.slot().ok_or(Error::NotPointer { type_name: target.type_name() })?;

    Ok(slot.with_target(&mut |slot_target| as_target(v, slot_target)))
}

/// Chains `values` together, returning the last one.
///
/// A single value is returned as is. Otherwise each value wraps the one before it: through its
/// own `Wrap` capability if it has one that accepts, and through a link holding the value if not.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn build<I>(values: I) -> Value
    where I: IntoIterator,
          I::Item: Into<Value>,
{
    match try_build(values) {
        Ok(chain) => chain,
        Err(err) => panic!("{}", err),
    }
}

/// Like [`build`], but returns an error on empty input.
pub fn try_build<I>(values: I) -> Result<Value, Error>
    where I: IntoIterator,
          I::Item: Into<Value>,
{
    let mut values = values.into_iter().map(Into::into);
    let mut src: Value = values.next().ok_or(Error::EmptyBuild)?;

    for dst in values {
        let accepted = dst.node()
                          .and_then(|node| node.wrapper())
                          .map_or(false, |wrapper| wrapper.wrap(&src));
        if accepted {
            trace!("build: {} wrapped {}", dst.type_name(), src.type_name());
            src = dst;
            continue;
        }

        trace!("build: linking {} to {}", dst.type_name(), src.type_name());
        let link = BuildLink::new(dst);
        let wrapped = link.wrap(&src);
        debug_assert!(wrapped, "links always accept a predecessor");
        src = Value::new(link);
    }

    Ok(src)
}
