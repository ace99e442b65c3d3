use core::time::Duration;

use rstest::*;

use crate::{Error, Key, ReadOptions, Value, parse};

const MIXED: &str = r#"{"a": 1, "b": 2.5, "c": true, "d": null, "e": "x", "f": [1,2], "g": {}}"#;

#[rstest]
#[timeout(Duration::from_millis(250))]
fn mixed_values_coerce_by_type() {
    let doc = parse(MIXED, ReadOptions::default()).unwrap();

    assert_eq!(doc.lookup("a").unwrap(), Value::Int(1));
    assert_eq!(doc.lookup("b").unwrap(), Value::Float(2.5));
    assert_eq!(doc.lookup("c").unwrap(), Value::Bool(true));
    assert_eq!(doc.lookup("d").unwrap(), Value::Null);
    assert_eq!(doc.lookup("e").unwrap(), Value::String("x".into()));

    let f = doc.lookup("f").unwrap();
    assert_eq!(f.as_array().unwrap().len().unwrap(), 2);
    let g = doc.lookup("g").unwrap();
    assert_eq!(g.as_object().unwrap().len().unwrap(), 0);

    assert_eq!(doc.len().unwrap(), 7);
}

#[rstest]
#[timeout(Duration::from_millis(250))]
fn integer_and_real_stay_distinct() {
    let doc = parse("[1, 1.0, -1, 1e0, 9223372036854775807]", ReadOptions::default()).unwrap();
    let values: Vec<_> = doc.values().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(
        values,
        vec![
            Value::Int(1),
            Value::Float(1.0),
            Value::Int(-1),
            Value::Float(1.0),
            Value::Int(i64::MAX),
        ]
    );
}

#[rstest]
#[timeout(Duration::from_millis(250))]
fn sequential_iterations_agree() {
    let doc = parse(MIXED, ReadOptions::default()).unwrap();
    let root = doc.root().unwrap();
    let obj = root.as_object().unwrap();

    let first: Vec<_> = obj.iter().unwrap().collect::<Result<_, _>>().unwrap();
    let second: Vec<_> = obj.iter().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(first, second);

    let keys: Vec<_> = first.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["a", "b", "c", "d", "e", "f", "g"]);
}

#[rstest]
#[timeout(Duration::from_millis(250))]
fn document_iteration_delegates_to_root() {
    let doc = parse(r#"{"x": 1, "y": [2]}"#, ReadOptions::default()).unwrap();
    let keys: Vec<_> = doc.keys().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(keys, vec![Key::Name("x".into()), Key::Name("y".into())]);

    let arr = parse(r#"["p", "q"]"#, ReadOptions::default()).unwrap();
    let keys: Vec<_> = arr.keys().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(keys, vec![Key::Index(1), Key::Index(2)]);

    let entries: Vec<_> = arr.iter().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(
        entries,
        vec![
            (Key::Index(1), Value::String("p".into())),
            (Key::Index(2), Value::String("q".into())),
        ]
    );
}

#[rstest]
#[timeout(Duration::from_millis(250))]
fn mismatched_index_kinds_miss() {
    let obj = parse(r#"{"1": "one"}"#, ReadOptions::default()).unwrap();
    assert_eq!(obj.get(1).unwrap(), None);
    assert!(matches!(obj.lookup(1), Err(Error::KeyNotFound(k)) if k == "1"));
    assert_eq!(obj.get("1").unwrap(), Some(Value::String("one".into())));

    let arr = parse("[true]", ReadOptions::default()).unwrap();
    assert_eq!(arr.get("1").unwrap(), None);
    assert_eq!(arr.get(1).unwrap(), Some(Value::Bool(true)));
    assert!(matches!(
        arr.lookup(2),
        Err(Error::IndexOutOfRange { index: 2, len: 1 })
    ));
    assert_eq!(arr.get_or(String::from("k"), Value::Int(0)).unwrap(), Value::Int(0));
}

#[rstest]
#[timeout(Duration::from_millis(250))]
fn nested_views_reach_deep_values() {
    let doc = parse(
        r#"{"a": {"b": [{"c": [10, 20, {"d": "deep"}]}]}}"#,
        ReadOptions::default(),
    )
    .unwrap();
    let a = doc.lookup("a").unwrap();
    let b = a.as_object().unwrap().lookup("b").unwrap();
    let first = b.as_array().unwrap().lookup(1).unwrap();
    let c = first.as_object().unwrap().lookup("c").unwrap();
    let third = c.as_array().unwrap().lookup(3).unwrap();
    assert_eq!(
        third.as_object().unwrap().lookup("d").unwrap(),
        Value::String("deep".into())
    );
    assert_eq!(
        doc.pointer("/a/b/0/c/2/d").unwrap(),
        Some(Value::String("deep".into()))
    );
}

#[rstest]
#[case(r#"["é😀"]"#, "é😀")]
#[case(r#"["tab\tquote\"slash\\"]"#, "tab\tquote\"slash\\")]
#[case(r#"[""]"#, "")]
#[timeout(Duration::from_millis(250))]
fn strings_are_decoded(#[case] src: &str, #[case] expected: &str) {
    let doc = parse(src, ReadOptions::default()).unwrap();
    assert_eq!(doc.lookup(1).unwrap(), Value::String(expected.into()));
}

#[rstest]
#[timeout(Duration::from_millis(250))]
fn whitespace_around_root() {
    let doc = parse(" \n\t{ \"k\" : [ ] }\r\n ", ReadOptions::default()).unwrap();
    assert!(doc.lookup("k").unwrap().is_array());
}

#[rstest]
#[timeout(Duration::from_millis(1_000))]
fn long_arrays() {
    let text = format!(
        "[{}]",
        (0..10_000).map(|i| i.to_string()).collect::<Vec<_>>().join(",")
    );
    let doc = parse(&text, ReadOptions::default()).unwrap();
    assert_eq!(doc.len().unwrap(), 10_000);
    assert_eq!(doc.lookup(10_000).unwrap(), Value::Int(9_999));
    let sum: i64 = doc
        .values()
        .unwrap()
        .map(|v| v.unwrap().as_i64().unwrap())
        .sum();
    assert_eq!(sum, (0..10_000i64).sum::<i64>());
}

#[rstest]
#[timeout(Duration::from_millis(250))]
fn read_options_reach_the_engine() {
    let raw = ReadOptions {
        number_as_raw: true,
        ..ReadOptions::default()
    };
    let doc = parse("[1, 2.50, -3e2, 0.1000, 1E+2]", raw).unwrap();
    let values: Vec<_> = doc.values().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(
        values,
        vec![
            Value::from("1"),
            Value::from("2.50"),
            Value::from("-3e2"),
            Value::from("0.1000"),
            Value::from("1E+2"),
        ]
    );

    let big = ReadOptions {
        bignum_as_raw: true,
        ..ReadOptions::default()
    };
    let doc = parse("[9223372036854775808]", big).unwrap();
    assert_eq!(doc.lookup(1).unwrap(), Value::from("9223372036854775808"));

    let doc = parse("[9223372036854775808]", ReadOptions::default()).unwrap();
    assert_eq!(doc.lookup(1).unwrap(), Value::Float(9_223_372_036_854_775_808.0));

    let head = ReadOptions {
        stop_when_done: true,
        ..ReadOptions::default()
    };
    let doc = parse("{\"first\": true}\n{\"second\": true}", head).unwrap();
    assert_eq!(doc.len().unwrap(), 1);
}

#[rstest]
#[case("9223372036854775808")]
#[case("-9223372036854775809")]
#[case("18446744073709551616")]
#[case("-123456789012345678901234567890")]
#[timeout(Duration::from_millis(250))]
fn bignums_of_either_sign_stay_raw(#[case] digits: &str) {
    let big = ReadOptions {
        bignum_as_raw: true,
        ..ReadOptions::default()
    };
    let doc = parse(format!("[{digits}, -5, 2.5]"), big).unwrap();
    assert_eq!(doc.lookup(1).unwrap(), Value::from(digits));
    assert_eq!(doc.lookup(2).unwrap(), Value::Int(-5));
    assert_eq!(doc.lookup(3).unwrap(), Value::Float(2.5));

    let doc = parse(format!("[{digits}]"), ReadOptions::default()).unwrap();
    assert_eq!(
        doc.lookup(1).unwrap(),
        Value::Float(digits.parse::<f64>().unwrap())
    );
}

#[rstest]
#[timeout(Duration::from_millis(250))]
fn in_range_integers_ignore_bignum_mode() {
    let big = ReadOptions {
        bignum_as_raw: true,
        ..ReadOptions::default()
    };
    let doc = parse("[-9223372036854775808, 9223372036854775807, -0]", big).unwrap();
    let values: Vec<_> = doc.values().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(
        values,
        vec![Value::Int(i64::MIN), Value::Int(i64::MAX), Value::Int(0)]
    );
}
