use crate::value::Value;

/// Holds a value, and a positive assertion that it was intentionally set.
///
/// This distinguishes a holder that was set to nil from one that was never set at all, which is
/// what wrapper types need to tell "no predecessor" apart from "nil predecessor".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Holder {
    value: Option<Value>,
}

impl Holder {
    /// Creates an empty holder.
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Creates a holder that is already set to `value`.
    pub fn hold(value: impl Into<Value>) -> Self {
        let mut this = Self::new();
        this.set(value);
        this
    }

    pub fn set(&mut self, value: impl Into<Value>) {
        self.value = Some(value.into());
    }

    /// Gets the value, or `None` if the holder was never set.
    pub fn get(&self) -> Option<Value> {
        self.value.clone()
    }

    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }

    /// Takes the value out, leaving the holder empty.
    pub fn take(&mut self) -> Option<Value> {
        self.value.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let h = Holder::new();
        assert!(!h.is_filled());
        assert_eq!(h.get(), None);
        assert_eq!(h, Holder::default());
    }

    #[test]
    fn nil_is_not_empty() {
        let h = Holder::hold(Value::nil());
        assert!(h.is_filled());
        assert_eq!(h.get(), Some(Value::nil()));
        assert_ne!(h, Holder::new());
    }

    #[test]
    fn set_overwrites() {
        let mut h = Holder::hold(1u8);
        h.set(2u8);
        assert_eq!(h.get(), Some(Value::from(2u8)));
    }

    #[test]
    fn take_empties() {
        let mut h = Holder::hold(Value::nil());
        assert_eq!(h.take(), Some(Value::nil()));
        assert!(!h.is_filled());
        assert_eq!(h.take(), None);
    }

    #[test]
    fn clones_are_independent() {
        let a = Holder::hold("a");
        let mut b = a.clone();
        b.set("b");
        assert_eq!(a.get(), Some(Value::from("a")));
        assert_eq!(b.get(), Some(Value::from("b")));
    }
}
