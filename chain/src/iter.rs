use std::iter::FusedIterator;

use crate::value::Value;

/// Iterator over a chain: the starting value, then each predecessor in turn.
///
/// Never ends on a cyclic chain.
#[derive(Debug, Clone)]
pub struct Iter {
    next: Option<Value>,
}

impl Iter {
    pub(crate) fn new(start: Value) -> Self {
        Self { next: Some(start) }
    }
}

impl Iterator for Iter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let node = self.next.take()?;
        self.next = crate::unwrap(&node);
        Some(node)
    }
}

impl FusedIterator for Iter {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{Link, Wrap};

    #[test]
    fn leaf() {
        let v = Value::from(1u8);
        let nodes: Vec<Value> = Iter::new(v.clone()).collect();
        assert_eq!(nodes.len(), 1);
        assert!(Value::ptr_eq(&nodes[0], &v));
    }

    #[test]
    fn nil_predecessor_is_yielded() {
        let l = Link::new();
        l.wrap(&Value::nil());
        let nodes: Vec<Value> = Iter::new(Value::new(l)).collect();
        assert_eq!(nodes.len(), 2);
        assert!(nodes[1].is_nil());
    }

    #[test]
    fn fused() {
        let mut it = Iter::new(Value::new(false));
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
