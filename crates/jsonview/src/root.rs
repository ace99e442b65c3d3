//! The root of a document and the keyed/ordinal access shared by both root
//! shapes.

use core::{fmt, ops::RangeInclusive};

use crate::{
    array::{ArrayIter, ArrayView},
    error::{Error, Result},
    object::{self, ObjectIter, ObjectView},
    value::Value,
};

/// The root of a document: always an object or an array.
#[derive(Clone, Debug, PartialEq)]
pub enum Root {
    /// An object root.
    Object(ObjectView),
    /// An array root.
    Array(ArrayView),
}

/// A key yielded by document-level iteration.
///
/// Object roots yield names; array roots yield 1-based ordinals.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A member name of an object root.
    Name(String),
    /// A 1-based ordinal of an array root.
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<Root> for Value {
    fn from(root: Root) -> Self {
        match root {
            Root::Object(o) => Value::Object(o),
            Root::Array(a) => Value::Array(a),
        }
    }
}

impl Root {
    /// The object view, if the root is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectView> {
        match self {
            Root::Object(o) => Some(o),
            Root::Array(_) => None,
        }
    }

    /// The array view, if the root is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&ArrayView> {
        match self {
            Root::Array(a) => Some(a),
            Root::Object(_) => None,
        }
    }

    /// Number of entries or elements.
    ///
    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn len(&self) -> Result<usize> {
        match self {
            Root::Object(o) => o.len(),
            Root::Array(a) => a.len(),
        }
    }

    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Look up a key (object root) or 1-based ordinal (array root). A key
    /// of the wrong kind for the root is a miss.
    ///
    /// # Errors
    ///
    /// See [`ObjectView::get`] and [`ArrayView::get`].
    pub fn get<I: Index>(&self, index: I) -> Result<Option<Value>> {
        index.index_into(self)
    }

    /// # Errors
    ///
    /// See [`ObjectView::get_or`] and [`ArrayView::get_or`].
    pub fn get_or<I: Index>(&self, index: I, default: Value) -> Result<Value> {
        Ok(index.index_into(self)?.unwrap_or(default))
    }

    /// # Errors
    ///
    /// [`Error::KeyNotFound`] or [`Error::IndexOutOfRange`] on a miss,
    /// otherwise as for [`get`](Self::get).
    pub fn lookup<I: Index>(&self, index: I) -> Result<Value> {
        match index.index_into(self)? {
            Some(v) => Ok(v),
            None => Err(index.not_found(self)),
        }
    }

    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed, or
    /// [`Error::IteratorInit`] for an object root that cannot be iterated.
    pub fn keys(&self) -> Result<Keys> {
        Ok(Keys(match self {
            Root::Object(o) => KeysInner::Object(o.keys()?),
            Root::Array(a) => KeysInner::Array {
                ordinals: 1..=a.len()?,
                view: a.clone(),
            },
        }))
    }

    /// # Errors
    ///
    /// As for [`keys`](Self::keys).
    pub fn values(&self) -> Result<Values> {
        Ok(match self {
            Root::Object(o) => Values::Object(o.values()?),
            Root::Array(a) => Values::Array(a.iter()?),
        })
    }

    /// # Errors
    ///
    /// As for [`keys`](Self::keys).
    pub fn iter(&self) -> Result<Entries> {
        Ok(match self {
            Root::Object(o) => Entries::Object(o.iter()?),
            Root::Array(a) => Entries::Array {
                inner: a.iter()?,
                next: 1,
            },
        })
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl Sealed for usize {}
    impl<T: ?Sized + Sealed> Sealed for &T {}
}

/// A type that can address an entry of a [`Root`]: `&str`/`String` keys for
/// object roots, `usize` 1-based ordinals for array roots.
///
/// This trait is sealed.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_into(&self, root: &Root) -> Result<Option<Value>>;

    #[doc(hidden)]
    fn not_found(&self, root: &Root) -> Error;
}

impl Index for str {
    fn index_into(&self, root: &Root) -> Result<Option<Value>> {
        match root {
            Root::Object(o) => o.get(self),
            Root::Array(_) => Ok(None),
        }
    }

    fn not_found(&self, _root: &Root) -> Error {
        Error::KeyNotFound(self.to_owned())
    }
}

impl Index for String {
    fn index_into(&self, root: &Root) -> Result<Option<Value>> {
        self.as_str().index_into(root)
    }

    fn not_found(&self, root: &Root) -> Error {
        self.as_str().not_found(root)
    }
}

impl Index for usize {
    fn index_into(&self, root: &Root) -> Result<Option<Value>> {
        match root {
            Root::Array(a) => a.get(*self),
            Root::Object(_) => Ok(None),
        }
    }

    fn not_found(&self, root: &Root) -> Error {
        match root {
            Root::Array(a) => Error::IndexOutOfRange {
                index: *self,
                len: a.len().unwrap_or_default(),
            },
            Root::Object(_) => Error::KeyNotFound(self.to_string()),
        }
    }
}

impl<T: ?Sized + Index> Index for &T {
    fn index_into(&self, root: &Root) -> Result<Option<Value>> {
        (**self).index_into(root)
    }

    fn not_found(&self, root: &Root) -> Error {
        (**self).not_found(root)
    }
}

/// Keys of a root in order. See [`Root::keys`].
#[derive(Debug)]
pub struct Keys(KeysInner);

#[derive(Debug)]
enum KeysInner {
    Object(object::Keys),
    /// Ordinals need no tape access, so liveness is checked on the view.
    Array {
        ordinals: RangeInclusive<usize>,
        view: ArrayView,
    },
}

impl Iterator for Keys {
    type Item = Result<Key>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.0 {
            KeysInner::Object(it) => it.next().map(|r| r.map(Key::Name)),
            KeysInner::Array { ordinals, view } => {
                let i = ordinals.next()?;
                if view.is_live() {
                    Some(Ok(Key::Index(i)))
                } else {
                    *ordinals = RangeInclusive::new(1, 0);
                    Some(Err(Error::Closed))
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.0 {
            KeysInner::Object(it) => it.size_hint(),
            KeysInner::Array { ordinals, .. } => ordinals.size_hint(),
        }
    }
}

/// Values of a root in order. See [`Root::values`].
#[derive(Debug)]
pub enum Values {
    /// Values of an object root.
    Object(object::Values),
    /// Elements of an array root.
    Array(ArrayIter),
}

impl Iterator for Values {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Values::Object(it) => it.next(),
            Values::Array(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Values::Object(it) => it.size_hint(),
            Values::Array(it) => it.size_hint(),
        }
    }
}

/// Key/value pairs of a root in order. See [`Root::iter`].
#[derive(Debug)]
pub enum Entries {
    /// Entries of an object root.
    Object(ObjectIter),
    /// Elements of an array root paired with their ordinals.
    Array {
        /// Remaining elements.
        inner: ArrayIter,
        /// Ordinal of the next element.
        next: usize,
    },
}

impl Iterator for Entries {
    type Item = Result<(Key, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Object(it) => it.next().map(|r| r.map(|(k, v)| (Key::Name(k), v))),
            Entries::Array { inner, next } => {
                let item = inner.next()?;
                let key = Key::Index(*next);
                *next += 1;
                Some(item.map(|v| (key, v)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Entries::Object(it) => it.size_hint(),
            Entries::Array { inner, .. } => inner.size_hint(),
        }
    }
}
