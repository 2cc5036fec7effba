use luxem::{luxem, from_str, to_string, ObjectMap, Typed, Value};

#[test]
fn test_luxem_macro_primitives() {
    assert_eq!(luxem!("hello world"), Value::Primitive("hello world".to_string()));
    assert_eq!(luxem!(""), Value::Primitive(String::new()));
    assert_eq!(luxem!(42), Value::Primitive("42".to_string()));
    assert_eq!(luxem!(-123), Value::Primitive("-123".to_string()));
    assert_eq!(luxem!(3.5), Value::Primitive("3.5".to_string()));
    assert_eq!(luxem!(false), Value::Primitive("false".to_string()));
}

#[test]
fn test_luxem_macro_arrays() {
    assert_eq!(luxem!([]), Value::Sequence(vec![]));

    let arr = luxem!([1, 2, 3]);
    assert_eq!(
        arr,
        Value::Sequence(vec![Value::from(1), Value::from(2), Value::from(3)])
    );

    let nested = luxem!([[], ["a"]]);
    let items = nested.as_sequence().unwrap();
    assert_eq!(items[0], Value::Sequence(vec![]));
    assert_eq!(items[1], Value::Sequence(vec![Value::from("a")]));
}

#[test]
fn test_luxem_macro_objects() {
    assert_eq!(luxem!({}), Value::Mapping(ObjectMap::new()));

    let obj = luxem!({
        "name": "Alice",
        "age": 30,
        "tags": ["rust", "codec"]
    });

    let map = obj.as_mapping().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("name"), Some(&Value::from("Alice")));
    assert_eq!(map.get("age"), Some(&Value::from(30)));
    assert_eq!(
        map.get("tags"),
        Some(&Value::Sequence(vec![
            Value::from("rust"),
            Value::from("codec"),
        ]))
    );
}

#[test]
fn test_luxem_macro_typed_values() {
    assert_eq!(
        luxem!(("int") 7),
        Value::Typed(Typed::new("int", Value::from(7)))
    );
    assert_eq!(
        luxem!(("config") {"path": "/usr/bin"}),
        Value::Typed(Typed::new("config", luxem!({"path": "/usr/bin"})))
    );
}

#[test]
fn test_luxem_macro_round_trips() {
    let doc = vec![luxem!({
        "key1": "val1",
        "key5": ["val5.1", (("type5.3") {"val5.3.3": []})]
    })];

    let text = to_string(&doc).unwrap();
    assert_eq!(from_str(&text).unwrap(), doc);
}

#[test]
fn test_luxem_macro_trailing_commas() {
    let obj = luxem!({
        "a": 1,
        "b": 2,
    });
    assert_eq!(obj.as_mapping().unwrap().len(), 2);

    let arr = luxem!([1, 2,]);
    assert_eq!(arr.as_sequence().unwrap().len(), 2);
}
