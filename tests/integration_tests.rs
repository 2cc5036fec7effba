use luxem::{
    extract, from_reader, from_slice, from_str, luxem, to_string, to_string_pretty,
    to_string_with_options, to_value, to_writer, ArrayShape, Error, Extract, ObjectMap,
    StructValue, Typed, Value, WriteOptions,
};
use serde::Serialize;
use std::io::Cursor;

#[test]
fn test_load_simple_documents() {
    assert_eq!(from_slice(b"").unwrap(), vec![]);
    assert_eq!(from_slice(b"a").unwrap(), vec![Value::from("a")]);
    assert_eq!(
        from_slice(b"a, a").unwrap(),
        vec![Value::from("a"), Value::from("a")]
    );
    assert_eq!(
        from_slice(b"(b)a").unwrap(),
        vec![Value::Typed(Typed::new("b", Value::from("a")))]
    );
}

#[test]
fn test_dump_simple_documents() {
    assert_eq!(to_string(&[Value::from(7)]).unwrap(), "7,");
    assert_eq!(
        to_string(&[Value::Typed(Typed::new("int", Value::from(7)))]).unwrap(),
        "(int) 7,"
    );
    assert_eq!(to_string(&[Value::from(7.9)]).unwrap(), "7.9,");
    assert_eq!(to_string(&[Value::from("hey")]).unwrap(), "hey,");
    assert_eq!(
        to_string(&[Value::from("hey glovebox")]).unwrap(),
        "\"hey glovebox\","
    );
    assert_eq!(
        to_string(&[Value::Mapping(ObjectMap::new())]).unwrap(),
        "{},"
    );
    assert_eq!(to_string(&[luxem!({"elebent": {}})]).unwrap(), "{elebent:{},},");
    assert_eq!(to_string(&[luxem!({"elebent": []})]).unwrap(), "{elebent:[],},");
    assert_eq!(to_string(&[Value::Sequence(vec![])]).unwrap(), "[],");
    assert_eq!(
        to_string(&[luxem!(["flag", "nutter"])]).unwrap(),
        "[flag,nutter,],"
    );
}

#[test]
fn test_round_trip_nested_document() {
    let doc = vec![luxem!({
        "key1": "val1",
        "key2 with spaces": "val2 with spaces",
        "key3": (("type3") "val3"),
        "key5": ["val5.1", (("type5.3") {"val5.3.3": []}), {}]
    })];

    for options in [WriteOptions::new(), WriteOptions::pretty()] {
        let text = to_string_with_options(&doc, options).unwrap();
        assert_eq!(from_str(&text).unwrap(), doc);
    }
}

#[test]
fn test_round_trip_awkward_primitives() {
    let doc = vec![
        Value::from(""),
        Value::from("has spaces"),
        Value::from("quo\"te"),
        Value::from("back\\slash"),
        Value::from("{[(*,:)]}"),
        Value::from("tra\nns\tlines"),
        Value::Typed(Typed::new("needs) quoting", Value::from("v"))),
    ];
    let text = to_string(&doc).unwrap();
    assert_eq!(from_str(&text).unwrap(), doc);
}

#[test]
fn test_load_from_reader_in_chunks() {
    let mut text = String::new();
    for index in 0..100 {
        text.push_str(&format!("\"index {}, plus junk: {}\",", index, "*".repeat(30)));
    }
    let doc = from_reader(Cursor::new(text.into_bytes())).unwrap();
    assert_eq!(doc.len(), 100);
    assert_eq!(doc[42].as_primitive(), Some("index 42, plus junk: ******************************"));
}

#[test]
fn test_streamed_and_buffered_output_identical() {
    let doc = vec![luxem!({"config": {"path": "/usr/bin", "iterations": 10}})];
    let buffered = to_string(&doc).unwrap();
    let mut streamed = Vec::new();
    to_writer(&mut streamed, &doc).unwrap();
    assert_eq!(buffered.as_bytes(), streamed.as_slice());
}

#[test]
fn test_serde_struct_to_luxem() {
    #[derive(Serialize)]
    struct Config {
        path: String,
        iterations: u32,
        optional: Option<String>,
    }

    let value = to_value(&Config {
        path: "/usr/bin".to_string(),
        iterations: 10,
        optional: None,
    })
    .unwrap();

    assert_eq!(
        to_string(&[value]).unwrap(),
        "{path:/usr/bin,iterations:10,optional:\"\",},"
    );
}

#[test]
fn test_serde_enum_becomes_typed_value() {
    #[derive(Serialize)]
    enum Batch {
        Plain(String),
        Optional(String),
    }

    let doc = vec![
        to_value(&Batch::Plain("batch001".to_string())).unwrap(),
        to_value(&Batch::Optional("batch003".to_string())).unwrap(),
    ];
    assert_eq!(
        to_string(&doc).unwrap(),
        "(Plain) batch001,(Optional) batch003,"
    );
}

#[test]
fn test_value_serializes_to_json() {
    let doc = luxem!({"key": ["a", (("int") 7)]});
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"key": ["a", {"int": "7"}]})
    );
}

#[test]
fn test_value_deserializes_from_json() {
    let value: Value = serde_json::from_str(r#"{"k": [1, true, "x"]}"#).unwrap();
    let map = value.as_mapping().unwrap();
    assert_eq!(
        map.get("k"),
        Some(&Value::Sequence(vec![
            Value::from(1),
            Value::from(true),
            Value::from("x"),
        ]))
    );
}

#[test]
fn test_extract_config_document() {
    let source = b"{
        config: (config) {
            path: /usr/bin,
            iterations: (int) 10,
        },
        inputs: [batch001, batch002, (optional) batch003],
    }";

    let mut config = None;
    let mut batches = Vec::new();
    extract(
        &source[..],
        Extract::object(
            luxem::ObjectShape::new()
                .field("config", Extract::tree(|value| {
                    config = Some(value);
                    Ok(())
                }))
                .field("inputs", Extract::array(ArrayShape::new().element(
                    Extract::passthrough(|annotation, text| {
                        batches.push((annotation.map(str::to_string), text.to_string()));
                        Ok(())
                    }),
                ))),
        ),
    )
    .unwrap();

    match config.unwrap() {
        StructValue::Typed(name, inner) => {
            assert_eq!(name, "config");
            let map = inner.as_mapping().unwrap().clone();
            assert_eq!(map["path"], StructValue::String("/usr/bin".to_string()));
            assert_eq!(map["iterations"], StructValue::Int(10));
        }
        other => panic!("expected typed config, got {:?}", other),
    }
    assert_eq!(
        batches,
        vec![
            (None, "batch001".to_string()),
            (None, "batch002".to_string()),
            (Some("optional".to_string()), "batch003".to_string()),
        ]
    );
}

#[test]
fn test_error_offsets() {
    match from_slice(b"   \"never closed") {
        Err(Error::Syntax { offset, .. }) => assert_eq!(offset, 16),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_no_partial_document_on_failure() {
    assert!(from_slice(b"[a, b").is_err());
    assert!(from_slice(b"{k v}").is_err());
    assert!(from_slice(b"]").is_err());
}

#[test]
fn test_pretty_idempotent() {
    let doc = from_slice(b"{key: [a, (t) {in: ner}], empty: []}").unwrap();
    let once = to_string_pretty(&doc).unwrap();
    let twice = to_string_pretty(&from_str(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
}
