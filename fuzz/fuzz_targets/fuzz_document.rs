#![no_main]

use arbitrary::Arbitrary;
use jsonview::{
    Error, ReadOptions, Value,
    native::{Allocator, Kind, NativeDoc, Node, ObjCursor},
};
use libfuzzer_sys::fuzz_target;
use serde_json::Value as Json;

#[derive(Arbitrary, Debug)]
struct Input {
    number_as_raw: bool,
    bignum_as_raw: bool,
    allow_invalid_unicode: bool,
    stop_when_done: bool,
    data: Vec<u8>,
}

impl Input {
    fn options(&self) -> ReadOptions {
        ReadOptions {
            number_as_raw: self.number_as_raw,
            bignum_as_raw: self.bignum_as_raw,
            allow_invalid_unicode: self.allow_invalid_unicode,
            stop_when_done: self.stop_when_done,
        }
    }

    /// Options under which the lazy document must agree exactly with an
    /// eager `serde_json::Value` parse.
    fn is_strict(&self) -> bool {
        !(self.number_as_raw
            || self.bignum_as_raw
            || self.allow_invalid_unicode
            || self.stop_when_done)
    }
}

fuzz_target!(|input: Input| {
    let options = input.options();
    let lazy = jsonview::parse(&input.data, options);

    if input.is_strict() {
        let eager = serde_json::from_slice::<Json>(&input.data);
        match (&eager, &lazy) {
            (Ok(json @ (Json::Object(_) | Json::Array(_))), Ok(doc)) => {
                assert!(agrees(&Value::from(doc.root().unwrap()), json));
            }
            (Ok(_), Err(Error::InvalidRoot { .. })) | (Err(_), Err(Error::Parse(_))) => {}
            // Number text is only validated for syntax eagerly; the tape
            // rejects numbers beyond the finite f64 range.
            (Ok(_), Err(Error::Parse(e))) if e.to_string().starts_with("number out of range") => {}
            (eager, lazy) => panic!("eager {eager:?} disagrees with lazy {lazy:?}"),
        }
    }

    if let Ok(mut doc) = lazy {
        walk(&Value::from(doc.root().unwrap()));
        doc.close();
        assert!(matches!(doc.root(), Err(Error::Closed)));
    }

    if let Ok(native) = NativeDoc::parse(
        &input.data,
        Allocator::with_capacity(input.data.len()),
        &options,
    ) {
        check_tape(&native, native.root());
    }
});

/// Structural agreement with serde_json. Duplicate keys collapse to the last
/// occurrence in serde_json but resolve to the first in a view, so objects
/// only check that every lazily seen key exists eagerly.
fn agrees(view: &Value, json: &Json) -> bool {
    match (view, json) {
        (Value::Null, Json::Null) => true,
        (Value::Bool(a), Json::Bool(b)) => a == b,
        (Value::Int(a), Json::Number(n)) => n.as_i64() == Some(*a),
        (Value::Float(a), Json::Number(n)) => n.as_f64() == Some(*a),
        (Value::String(a), Json::String(b)) => a == b,
        (Value::Array(a), Json::Array(b)) => {
            a.len().unwrap() == b.len()
                && a.iter().unwrap().zip(b).all(|(x, y)| agrees(&x.unwrap(), y))
        }
        (Value::Object(a), Json::Object(b)) => {
            a.len().unwrap() >= b.len()
                && a.keys().unwrap().all(|k| b.contains_key(&k.unwrap()))
        }
        _ => false,
    }
}

fn walk(value: &Value) {
    match value {
        Value::Object(o) => {
            let len = o.len().unwrap();
            let mut seen = 0;
            for entry in o.iter().unwrap() {
                let (key, child) = entry.unwrap();
                assert!(o.contains_key(&key).unwrap());
                walk(&child);
                seen += 1;
            }
            assert_eq!(seen, len);
        }
        Value::Array(a) => {
            let len = a.len().unwrap();
            assert!(a.get(0).unwrap().is_none());
            assert!(a.get(len + 1).unwrap().is_none());
            for i in 1..=len {
                walk(&a.lookup(i).unwrap());
            }
        }
        _ => {}
    }
}

fn check_tape(doc: &NativeDoc, node: Node) {
    match doc.kind(node) {
        Kind::Obj => {
            let size = doc.obj_size(node);
            let mut cursor = ObjCursor::init(doc, node).unwrap();
            let mut seen = 0;
            while let Some(key) = cursor.advance(doc) {
                assert!(doc.is_str(key));
                let key_bytes = doc.get_str(key).unwrap();
                assert!(doc.obj_get(node, key_bytes).is_some());
                check_tape(doc, ObjCursor::get_val(key));
                seen += 1;
            }
            assert_eq!(seen, size);
        }
        Kind::Arr => {
            let size = doc.arr_size(node);
            for i in 0..size {
                check_tape(doc, doc.arr_get(node, i).unwrap());
            }
            assert!(doc.arr_get(node, size).is_none());
        }
        _ => {}
    }
}
