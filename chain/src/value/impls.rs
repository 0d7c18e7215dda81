use super::*;

impl_node! {
    (), bool, char,
    f32, f64,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    String, &'static str,
    TypeId,
}

impl_assign! {
    (), bool, char,
    f32, f64,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    String, &'static str,
    TypeId,
}

/// `None` is the typed nil of `T`.
impl<T: Node + PartialEq> Node for Option<T> {
    fn node_eq(&self, other: &dyn Node) -> bool {
        deep_eq(self, other)
    }

    fn is_nil(&self) -> bool {
        self.is_none()
    }
}

impl<T: Node + PartialEq> Node for Vec<T> {
    fn node_eq(&self, other: &dyn Node) -> bool {
        deep_eq(self, other)
    }
}
