//! The recursive mapping merge.
//!
//! Nested mappings are merged key by key. Any other pairing (sequence,
//! scalar, or a mapping meeting a non-mapping) is resolved by taking the
//! source value whole, so the later document always wins a type clash.

use serde_yaml::{Mapping, Value};

/// Merge `src` into `dst` in place.
///
/// Keys only present in `dst` are left alone. Replaced keys keep their
/// original position in `dst`; new keys are appended in `src` order.
pub fn deep_merge(dst: &mut Mapping, src: Mapping) {
    for (key, value) in src {
        match value {
            Value::Mapping(incoming) => match dst.get_mut(&key) {
                Some(Value::Mapping(existing)) => deep_merge(existing, incoming),
                _ => {
                    dst.insert(key, Value::Mapping(incoming));
                }
            },
            other => {
                dst.insert(key, other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn yaml(text: &str) -> Mapping {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn disjoint_keys_are_unioned() {
        let mut dst = yaml("a: 1");
        deep_merge(&mut dst, yaml("b: 2"));
        assert_eq!(dst, yaml("{a: 1, b: 2}"));
    }

    #[test]
    fn nested_mappings_merge_recursively() {
        let mut dst = yaml("User: {properties: {id: {type: integer}}}");
        deep_merge(&mut dst, yaml("User: {properties: {name: {type: string}}}"));

        let props = dst["User"]["properties"].as_mapping().unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props["id"]["type"], Value::from("integer"));
        assert_eq!(props["name"]["type"], Value::from("string"));
    }

    #[test]
    fn sequences_are_replaced_not_extended() {
        let mut dst = yaml("required: [id, email]");
        deep_merge(&mut dst, yaml("required: [name]"));
        assert_eq!(dst, yaml("required: [name]"));
    }

    #[test]
    fn scalar_overwrites_mapping() {
        let mut dst = yaml("schema: {type: object}");
        deep_merge(&mut dst, yaml("schema: plain"));
        assert_eq!(dst["schema"], Value::from("plain"));
    }

    #[test]
    fn mapping_overwrites_scalar() {
        let mut dst = yaml("schema: plain");
        deep_merge(&mut dst, yaml("schema: {type: object}"));
        assert_eq!(dst, yaml("schema: {type: object}"));
    }

    #[test]
    fn replaced_key_keeps_position() {
        let mut dst = yaml("{a: 1, b: 2, c: 3}");
        deep_merge(&mut dst, yaml("{d: 4, b: 20}"));
        let keys: Vec<_> = dst.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["a", "b", "c", "d"]);
        assert_eq!(dst["b"], Value::from(20));
    }

    #[test]
    fn null_source_value_overwrites() {
        let mut dst = yaml("a: {b: 1}");
        deep_merge(&mut dst, yaml("a: null"));
        assert_eq!(dst["a"], Value::Null);
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,6}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
                arb_mapping_of(inner).prop_map(Value::Mapping),
            ]
        })
    }

    fn arb_mapping_of(inner: impl Strategy<Value = Value>) -> impl Strategy<Value = Mapping> {
        prop::collection::btree_map("[a-d]", inner, 0..4)
            .prop_map(|m| m.into_iter().map(|(k, v)| (Value::String(k), v)).collect::<Mapping>())
    }

    fn arb_mapping() -> impl Strategy<Value = Mapping> {
        arb_mapping_of(arb_value())
    }

    proptest! {
        #[test]
        fn merging_twice_equals_merging_once(src in arb_mapping()) {
            let mut once = Mapping::new();
            deep_merge(&mut once, src.clone());

            let mut twice = Mapping::new();
            deep_merge(&mut twice, src.clone());
            deep_merge(&mut twice, src);

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn later_source_wins_every_non_mapping_leaf(a in arb_mapping(), b in arb_mapping()) {
            let mut merged = a.clone();
            deep_merge(&mut merged, b.clone());

            for (key, value) in &b {
                prop_assert!(merged.contains_key(key));
                if !value.is_mapping() {
                    prop_assert_eq!(&merged[key], value);
                }
            }
            for (key, value) in &a {
                if !b.contains_key(key) {
                    prop_assert_eq!(&merged[key], value);
                }
            }
        }
    }
}
