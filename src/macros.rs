/// Builds a [`Value`](crate::Value) tree from a literal.
///
/// Arrays become sequences, brace blocks become mappings, and a
/// parenthesized string literal prefixes a typed value. Scalars go through
/// `Value::from`, so numbers and booleans become their primitive text.
///
/// ```rust
/// use luxem::{luxem, to_string};
///
/// let doc = luxem!({
///     "config": {
///         "path": "/usr/bin",
///         "iterations": 10
///     },
///     "inputs": ["batch001", (("optional") "batch003")]
/// });
///
/// assert!(to_string(&[doc]).unwrap().starts_with("{config:"));
/// ```
#[macro_export]
macro_rules! luxem {
    // Empty array
    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    // Non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::luxem!($elem)),*])
    };

    // Empty object
    ({}) => {
        $crate::Value::Mapping($crate::ObjectMap::new())
    };

    // Non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::ObjectMap::new();
        $(
            map.insert($key.to_string(), $crate::luxem!($value));
        )*
        $crate::Value::Mapping(map)
    }};

    // Typed value: (("name") value)
    ((($name:literal) $value:tt)) => {
        $crate::luxem!(($name) $value)
    };

    // Typed value: ("name") value
    (($name:literal) $value:tt) => {
        $crate::Value::Typed($crate::Typed::new($name, $crate::luxem!($value)))
    };

    // Any other expression through Value::from
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{ObjectMap, Typed, Value};

    #[test]
    fn test_luxem_macro_primitives() {
        assert_eq!(luxem!("hello"), Value::Primitive("hello".to_string()));
        assert_eq!(luxem!(42), Value::Primitive("42".to_string()));
        assert_eq!(luxem!(7.5), Value::Primitive("7.5".to_string()));
        assert_eq!(luxem!(true), Value::Primitive("true".to_string()));
    }

    #[test]
    fn test_luxem_macro_arrays() {
        assert_eq!(luxem!([]), Value::Sequence(vec![]));

        let arr = luxem!(["a", "b", "c"]);
        match arr {
            Value::Sequence(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Value::from("a"));
            }
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_luxem_macro_objects() {
        assert_eq!(luxem!({}), Value::Mapping(ObjectMap::new()));

        let obj = luxem!({
            "name": "Alice",
            "age": 30
        });
        let map = obj.as_mapping().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name"), Some(&Value::from("Alice")));
        assert_eq!(map.get("age"), Some(&Value::from(30)));
    }

    #[test]
    fn test_luxem_macro_typed() {
        assert_eq!(
            luxem!(("int") 7),
            Value::Typed(Typed::new("int", Value::from(7)))
        );
        assert_eq!(
            luxem!([(("int") 7), "x"]),
            Value::Sequence(vec![
                Value::Typed(Typed::new("int", Value::from(7))),
                Value::from("x"),
            ])
        );
    }

    #[test]
    fn test_luxem_macro_nested() {
        let doc = luxem!({
            "key5": ["val5.1", (("type5.3") {"val5.3.3": []})]
        });
        let inner = doc.as_mapping().unwrap().get("key5").unwrap();
        let items = inner.as_sequence().unwrap();
        assert_eq!(items[0], Value::from("val5.1"));
        assert_eq!(items[1].as_typed().unwrap().name, "type5.3");
    }
}
