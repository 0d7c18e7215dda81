//! Property-based tests for chain building and traversal.

use chain::{as_, build, is, iter, unwrap, Value};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every value is its own chain, and matches an equal copy of itself.
    #[test]
    fn is_reflexive(s in any::<String>(), n in any::<i64>()) {
        let v = Value::from(s.clone());
        prop_assert!(is(&v, &v));
        prop_assert!(is(&v, &Value::from(s)));

        let v = Value::from(n);
        prop_assert!(is(&v, &Value::from(n)));
        prop_assert!(!is(&v, &Value::from(n.wrapping_add(1))));
    }

    /// A built chain matches each of its elements, has one node per element, and converts to
    /// the most recently added one first.
    #[test]
    fn build_matches_every_element(elements in prop::collection::vec(any::<u32>(), 1..16)) {
        let c = build(elements.iter().copied());

        for n in &elements {
            prop_assert!(is(&c, &Value::from(*n)));
        }
        prop_assert_eq!(iter(&c).count(), elements.len());

        let mut last = 0u32;
        prop_assert!(as_(&c, &mut last));
        prop_assert_eq!(Some(&last), elements.last());
    }

    /// Unwrapping a built chain walks the elements back in reverse order.
    #[test]
    fn unwrap_reverses_build(elements in prop::collection::vec(any::<i16>(), 1..16)) {
        let mut node = build(elements.iter().copied());

        for expected in elements.iter().rev() {
            let mut n = 0i16;
            prop_assert!(as_(&node, &mut n));
            prop_assert_eq!(n, *expected);

            match unwrap(&node) {
                Some(next) => node = next,
                None => break,
            }
        }
        prop_assert_eq!(unwrap(&node), None);
    }

    /// Nothing outside the chain matches.
    #[test]
    fn is_rejects_absent(elements in prop::collection::vec(0u8..128, 1..8), absent in 128u8..) {
        let c = build(elements);
        prop_assert!(!is(&c, &Value::from(absent)));
    }
}
