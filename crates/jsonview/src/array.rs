//! Lazy, read-only view over a native array node.

use core::fmt;
use std::rc::{Rc, Weak};

use crate::{
    error::{Error, Result},
    native::{NativeDoc, Node},
    value::{Value, coerce},
};

/// A JSON array read on demand from its document.
///
/// Indices are 1-based ordinals: `get(1)` is the first element and
/// `get(len)` the last. Index `0` is always out of range.
///
/// The view carries no iteration state, so any number of
/// [`iter`](Self::iter) passes may run side by side.
///
/// # Examples
///
/// ```
/// use jsonview::{ReadOptions, Value};
///
/// let doc = jsonview::parse("[10, 20, 30]", ReadOptions::default()).unwrap();
/// let arr = doc.root().unwrap();
/// let arr = arr.as_array().unwrap();
/// assert_eq!(arr.get(1).unwrap(), Some(Value::Int(10)));
/// assert_eq!(arr.get(0).unwrap(), None);
/// assert_eq!(arr.get_or(4, Value::Null).unwrap(), Value::Null);
/// ```
#[derive(Clone)]
pub struct ArrayView {
    doc: Weak<NativeDoc>,
    node: Node,
}

impl ArrayView {
    pub(crate) fn new(doc: Weak<NativeDoc>, node: Node) -> Self {
        Self { doc, node }
    }

    fn doc(&self) -> Result<Rc<NativeDoc>> {
        self.doc.upgrade().ok_or(Error::Closed)
    }

    /// Whether the owning document is still open.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.doc.strong_count() > 0
    }

    /// Number of elements. Constant time; nothing is materialized.
    ///
    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn len(&self) -> Result<usize> {
        Ok(self.doc()?.arr_size(self.node))
    }

    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn node_at(doc: &NativeDoc, array: Node, index: usize) -> Option<Node> {
        doc.arr_get(array, index.checked_sub(1)?)
    }

    /// The element at 1-based `index`, or `None` outside `1..=len`.
    ///
    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed, or
    /// [`Error::StringExtraction`] if the element is an unreadable string.
    pub fn get(&self, index: usize) -> Result<Option<Value>> {
        let doc = self.doc()?;
        Self::node_at(&doc, self.node, index)
            .map(|node| coerce(&doc, node))
            .transpose()
    }

    /// The element at 1-based `index`, or `default` unchanged when out of
    /// range.
    ///
    /// # Errors
    ///
    /// As for [`get`](Self::get); out of range is never an error.
    pub fn get_or(&self, index: usize, default: Value) -> Result<Value> {
        Ok(self.get(index)?.unwrap_or(default))
    }

    /// The element at 1-based `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] outside `1..=len`, otherwise as for
    /// [`get`](Self::get).
    pub fn lookup(&self, index: usize) -> Result<Value> {
        let doc = self.doc()?;
        let node = Self::node_at(&doc, self.node, index).ok_or(Error::IndexOutOfRange {
            index,
            len: doc.arr_size(self.node),
        })?;
        coerce(&doc, node)
    }

    /// # Errors
    ///
    /// As for [`get`](Self::get).
    pub fn first(&self) -> Result<Option<Value>> {
        self.get(1)
    }

    /// # Errors
    ///
    /// As for [`get`](Self::get).
    pub fn last(&self) -> Result<Option<Value>> {
        self.get(self.len()?)
    }

    /// Iterate over the elements in order.
    ///
    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn iter(&self) -> Result<ArrayIter> {
        let doc = self.doc()?;
        Ok(ArrayIter {
            doc: self.doc.clone(),
            next: doc.arr_get(self.node, 0),
            remaining: doc.arr_size(self.node),
        })
    }

    /// Alias of [`iter`](Self::iter).
    ///
    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn values(&self) -> Result<ArrayIter> {
        self.iter()
    }
}

impl PartialEq for ArrayView {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.doc, &other.doc) && self.node == other.node
    }
}

impl fmt::Debug for ArrayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayView")
            .field("node", &self.node.index())
            .field("live", &self.is_live())
            .finish()
    }
}

/// Iterator over an array's elements.
#[derive(Debug)]
pub struct ArrayIter {
    doc: Weak<NativeDoc>,
    next: Option<Node>,
    remaining: usize,
}

impl Iterator for ArrayIter {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let Some(doc) = self.doc.upgrade() else {
            self.remaining = 0;
            return Some(Err(Error::Closed));
        };
        let node = self.next?;
        self.remaining -= 1;
        self.next = (self.remaining > 0).then(|| doc.next_sibling(node));
        Some(coerce(&doc, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
