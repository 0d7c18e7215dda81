/// Implements `Node` for leaf types that have `PartialEq` and no capabilities.
///
/// ```
/// #[derive(Debug, PartialEq)]
/// struct Sentinel(u8);
///
/// chain::impl_node!(Sentinel);
///
/// assert_eq!(chain::Value::new(Sentinel(1)), chain::Value::new(Sentinel(1)));
/// ```
#[macro_export]
macro_rules! impl_node {
    ($($t:ty),+ $(,)?) => {$(
        impl $crate::Node for $t {
            #[inline]
            fn node_eq(&self, other: &dyn $crate::Node) -> bool {
                $crate::deep_eq(self, other)
            }
        }
    )+}
}

/// Implements `Assign` for `Clone` node types, making them usable as `as_` targets.
///
/// A node is assignable only if its concrete type is exactly the target type; the target receives
/// a clone.
#[macro_export]
macro_rules! impl_assign {
    ($($t:ty),+ $(,)?) => {$(
        impl $crate::Assign for $t {
            #[inline]
            fn assign_from(node: &$crate::Value) -> ::core::option::Option<Self> {
                node.downcast_ref::<$t>().cloned()
            }

            #[inline]
            fn assignable_from(node: &$crate::Value) -> bool {
                node.is::<$t>()
            }
        }
    )+}
}

/// Builds a chain from a list of expressions, each converted with `Value::from`.
///
/// Panics if the list is empty, like [`build`](crate::build).
///
/// ```
/// let c = chain::chain!["a", "b", "c"];
/// assert!(chain::is(&c, &"a".into()));
/// ```
#[macro_export]
macro_rules! chain {
    ($($v:expr),* $(,)?) => {{
        let values: ::std::vec::Vec<$crate::Value> = ::std::vec![$($crate::Value::from($v)),*];
        $crate::build(values)
    }}
}
