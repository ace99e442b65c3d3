//! The native document engine.
//!
//! A parsed document is an immutable tape of typed slots owned by an
//! [`Allocator`]. Everything above this module reaches the tape only through
//! the primitives on [`NativeDoc`]: type predicates, scalar extraction, and
//! object/array access by [`Node`] handle. The view layer never sees the
//! slot layout.

mod alloc;
mod builder;

use std::borrow::Cow;

use bstr::ByteSlice;
use serde::de::DeserializeSeed;

pub use self::alloc::Allocator;
use self::{alloc::Slot, builder::TapeSeed};
use crate::options::ReadOptions;

/// Opaque handle to one value on a native document's tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(usize);

impl Node {
    /// Position of this node on the tape.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn dangling() -> Self {
        Node(usize::MAX)
    }
}

/// Native type tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool,
    /// An integer that fits in `i64`.
    Int,
    /// Any other typed number.
    Real,
    /// A decoded string.
    Str,
    /// Number text kept verbatim.
    Raw,
    /// An array.
    Arr,
    /// An object.
    Obj,
    /// The handle does not address a slot.
    None,
}

impl Kind {
    /// Human-readable name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Int => "integer",
            Kind::Real => "real",
            Kind::Str => "string",
            Kind::Raw => "raw",
            Kind::Arr => "array",
            Kind::Obj => "object",
            Kind::None => "none",
        }
    }
}

/// An immutable parsed document together with the allocator that backs it.
///
/// Dropping a `NativeDoc` frees the tape and the allocator in one step.
#[derive(Debug)]
pub struct NativeDoc {
    alloc: Allocator,
}

impl NativeDoc {
    /// Tokenize `input` into `alloc`.
    ///
    /// # Errors
    ///
    /// Returns the tokenizer's error for malformed input, including empty
    /// input and, unless [`ReadOptions::stop_when_done`] is set, trailing
    /// characters after the first value.
    pub fn parse(
        input: &[u8],
        mut alloc: Allocator,
        options: &ReadOptions,
    ) -> Result<Self, serde_json::Error> {
        let input: Cow<'_, [u8]> = if options.allow_invalid_unicode {
            match input.to_str_lossy() {
                Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
                Cow::Owned(s) => Cow::Owned(s.into_bytes()),
            }
        } else {
            Cow::Borrowed(input)
        };

        let mut de = serde_json::Deserializer::from_slice(&input);
        TapeSeed::new(&mut alloc, options).deserialize(&mut de)?;
        if !options.stop_when_done {
            de.end()?;
        }
        alloc.shrink_to_fit();
        Ok(Self { alloc })
    }

    /// The root value. A parsed document always has one.
    #[must_use]
    pub fn root(&self) -> Node {
        Node(0)
    }

    /// Total number of nodes on the tape, object keys included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.alloc.slot_count()
    }

    /// Native type tag of `node`.
    #[must_use]
    pub fn kind(&self, node: Node) -> Kind {
        match self.alloc.slot(node.0) {
            Some(Slot::Null) => Kind::Null,
            Some(Slot::Bool(_)) => Kind::Bool,
            Some(Slot::Int(_)) => Kind::Int,
            Some(Slot::Real(_)) => Kind::Real,
            Some(Slot::Str { .. }) => Kind::Str,
            Some(Slot::Raw { .. }) => Kind::Raw,
            Some(Slot::Arr { .. }) => Kind::Arr,
            Some(Slot::Obj { .. }) => Kind::Obj,
            None => Kind::None,
        }
    }

    /// Whether `node` is a decoded string.
    #[must_use]
    pub fn is_str(&self, node: Node) -> bool {
        self.kind(node) == Kind::Str
    }

    /// Whether `node` holds unparsed number text.
    #[must_use]
    pub fn is_raw(&self, node: Node) -> bool {
        self.kind(node) == Kind::Raw
    }

    /// Whether `node` is a typed number, integer or real.
    #[must_use]
    pub fn is_num(&self, node: Node) -> bool {
        matches!(self.kind(node), Kind::Int | Kind::Real)
    }

    /// Whether `node` is a real number.
    #[must_use]
    pub fn is_real(&self, node: Node) -> bool {
        self.kind(node) == Kind::Real
    }

    /// Whether `node` is a boolean.
    #[must_use]
    pub fn is_bool(&self, node: Node) -> bool {
        self.kind(node) == Kind::Bool
    }

    /// Whether `node` is an object.
    #[must_use]
    pub fn is_obj(&self, node: Node) -> bool {
        self.kind(node) == Kind::Obj
    }

    /// Whether `node` is an array.
    #[must_use]
    pub fn is_arr(&self, node: Node) -> bool {
        self.kind(node) == Kind::Arr
    }

    /// Bytes of a string or raw node.
    #[must_use]
    pub fn get_str(&self, node: Node) -> Option<&[u8]> {
        match self.alloc.slot(node.0)? {
            Slot::Str { start, len } | Slot::Raw { start, len } => self.alloc.bytes(start, len),
            _ => None,
        }
    }

    /// Value of a real node.
    #[must_use]
    pub fn get_real(&self, node: Node) -> Option<f64> {
        match self.alloc.slot(node.0)? {
            Slot::Real(v) => Some(v),
            _ => None,
        }
    }

    /// Value of an integer node.
    #[must_use]
    pub fn get_int(&self, node: Node) -> Option<i64> {
        match self.alloc.slot(node.0)? {
            Slot::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Value of a boolean node.
    #[must_use]
    pub fn get_bool(&self, node: Node) -> Option<bool> {
        match self.alloc.slot(node.0)? {
            Slot::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Number of key/value pairs; zero for anything but an object.
    #[must_use]
    pub fn obj_size(&self, node: Node) -> usize {
        match self.alloc.slot(node.0) {
            Some(Slot::Obj { len, .. }) => len,
            _ => 0,
        }
    }

    /// Number of elements; zero for anything but an array.
    #[must_use]
    pub fn arr_size(&self, node: Node) -> usize {
        match self.alloc.slot(node.0) {
            Some(Slot::Arr { len, .. }) => len,
            _ => 0,
        }
    }

    /// Value of the first pair whose key equals `key`. Linear in the number
    /// of pairs.
    #[must_use]
    pub fn obj_get(&self, node: Node, key: &[u8]) -> Option<Node> {
        let mut cursor = ObjCursor::init(self, node)?;
        while let Some(k) = cursor.advance(self) {
            if self.get_str(k) == Some(key) {
                return Some(ObjCursor::get_val(k));
            }
        }
        None
    }

    /// Element at 0-based `index`. Linear in `index`.
    #[must_use]
    pub fn arr_get(&self, node: Node, index: usize) -> Option<Node> {
        if index >= self.arr_size(node) {
            return None;
        }
        let mut cur = Node(node.0 + 1);
        for _ in 0..index {
            cur = self.next_sibling(cur);
        }
        Some(cur)
    }

    /// The node following `node` and all of its descendants.
    #[must_use]
    pub fn next_sibling(&self, node: Node) -> Node {
        match self.alloc.slot(node.0) {
            Some(Slot::Arr { end, .. } | Slot::Obj { end, .. }) => Node(end),
            _ => Node(node.0 + 1),
        }
    }
}

/// Position within an object's key/value pairs.
///
/// A cursor borrows nothing; it stays meaningful only for the document it
/// was initialized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjCursor {
    idx: usize,
    max: usize,
    cur: Node,
}

impl ObjCursor {
    /// Start a pass over `node`. `None` if `node` is not an object.
    #[must_use]
    pub fn init(doc: &NativeDoc, node: Node) -> Option<Self> {
        match doc.alloc.slot(node.0)? {
            Slot::Obj { len, .. } => Some(Self {
                idx: 0,
                max: len,
                cur: Node(node.0 + 1),
            }),
            _ => None,
        }
    }

    /// Whether any pair is left to visit.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.idx < self.max
    }

    /// Pairs not yet visited.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.max - self.idx
    }

    /// Advance to the next pair and return its key node.
    pub fn advance(&mut self, doc: &NativeDoc) -> Option<Node> {
        if !self.has_next() {
            return None;
        }
        let key = self.cur;
        self.cur = doc.next_sibling(Self::get_val(key));
        self.idx += 1;
        Some(key)
    }

    /// Value node paired with `key`.
    #[must_use]
    pub fn get_val(key: Node) -> Node {
        Node(key.0 + 1)
    }
}
