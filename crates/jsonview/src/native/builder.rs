//! Tape construction driven by `serde_json`'s tokenizer.
//!
//! `TapeSeed` is a [`DeserializeSeed`] that appends one slot per visited value
//! instead of building an owned tree. Containers push a placeholder first and
//! patch in their length and extent after the last child.
//!
//! `serde_json` runs with `arbitrary_precision`: integers that fit in 64 bits
//! arrive through `visit_i64`/`visit_u64`, every other number arrives as a
//! one-entry map keyed by [`NUMBER_TOKEN`] whose value is the literal source
//! text. The object placeholder pushed for that map is overwritten with the
//! number's slot.

use core::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use super::alloc::{Allocator, Slot};
use crate::options::ReadOptions;

/// Map key `serde_json` uses to hand over number text verbatim.
const NUMBER_TOKEN: &str = "$serde_json::private::Number";

pub(super) struct TapeSeed<'a> {
    alloc: &'a mut Allocator,
    options: &'a ReadOptions,
}

impl<'a> TapeSeed<'a> {
    pub(super) fn new(alloc: &'a mut Allocator, options: &'a ReadOptions) -> Self {
        Self { alloc, options }
    }
}

/// Slot for number text that did not fit a 64-bit integer, or any number
/// when `number_as_raw` is set.
fn number_slot<E: de::Error>(
    alloc: &mut Allocator,
    options: &ReadOptions,
    text: &str,
) -> Result<Slot, E> {
    if options.number_as_raw {
        return Ok(alloc.raw_slot(text));
    }
    let integral = !text.contains(['.', 'e', 'E']);
    if integral {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Slot::Int(i));
        }
        if options.bignum_as_raw {
            return Ok(alloc.raw_slot(text));
        }
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Slot::Real(v)),
        _ => Err(E::custom("number out of range")),
    }
}

impl<'de> DeserializeSeed<'de> for TapeSeed<'_> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for TapeSeed<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        self.alloc.push(Slot::Null);
        Ok(())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<(), E> {
        self.alloc.push(Slot::Bool(v));
        Ok(())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<(), E> {
        if self.options.number_as_raw {
            self.alloc.push_raw(&v.to_string());
        } else {
            self.alloc.push(Slot::Int(v));
        }
        Ok(())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<(), E> {
        match i64::try_from(v) {
            Ok(i) => self.visit_i64(i),
            Err(_) => {
                let slot = number_slot(self.alloc, self.options, &v.to_string())?;
                self.alloc.push(slot);
                Ok(())
            }
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<(), E> {
        if self.options.number_as_raw {
            let text = serde_json::Number::from_f64(v)
                .map_or_else(|| v.to_string(), |n| n.to_string());
            self.alloc.push_raw(&text);
        } else {
            self.alloc.push(Slot::Real(v));
        }
        Ok(())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        self.alloc.push_str(v);
        Ok(())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        let TapeSeed { alloc, options } = self;
        let at = alloc.push(Slot::Arr { len: 0, end: 0 });
        let mut len = 0;
        while seq
            .next_element_seed(TapeSeed::new(&mut *alloc, options))?
            .is_some()
        {
            len += 1;
        }
        let end = alloc.next_index();
        alloc.finish(at, Slot::Arr { len, end });
        Ok(())
    }

    fn visit_map<A>(self, mut map: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        let TapeSeed { alloc, options } = self;
        let at = alloc.push(Slot::Obj { len: 0, end: 0 });
        let mut len = 0;
        while let Some(key) = map.next_key_seed(KeySeed {
            alloc: &mut *alloc,
            first: len == 0,
        })? {
            if key == KeyKind::Number {
                let text: String = map.next_value()?;
                let slot = number_slot(alloc, options, &text)?;
                alloc.finish(at, slot);
                return Ok(());
            }
            map.next_value_seed(TapeSeed::new(&mut *alloc, options))?;
            len += 1;
        }
        let end = alloc.next_index();
        alloc.finish(at, Slot::Obj { len, end });
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    /// A member name, now on the tape.
    Name,
    /// The number marker; nothing was pushed.
    Number,
}

/// Object keys land on the tape as string slots, except the number marker
/// in first position.
struct KeySeed<'a> {
    alloc: &'a mut Allocator,
    first: bool,
}

impl<'de> DeserializeSeed<'de> for KeySeed<'_> {
    type Value = KeyKind;

    fn deserialize<D>(self, deserializer: D) -> Result<KeyKind, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for KeySeed<'_> {
    type Value = KeyKind;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<KeyKind, E> {
        if self.first && v == NUMBER_TOKEN {
            return Ok(KeyKind::Number);
        }
        self.alloc.push_str(v);
        Ok(KeyKind::Name)
    }
}
