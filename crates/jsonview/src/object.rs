//! Lazy, read-only view over a native object node.

use core::fmt;
use std::rc::{Rc, Weak};

use crate::{
    error::{Error, Result},
    native::{NativeDoc, Node, ObjCursor},
    value::{Value, coerce, extract_string},
};

/// A JSON object read on demand from its document.
///
/// The view holds no data of its own: every lookup goes to the native tree,
/// and the value found is coerced at that moment. Once the owning
/// [`Document`](crate::Document) is closed, every operation fails with
/// [`Error::Closed`].
///
/// Iteration follows source order. Each call to [`iter`](Self::iter) starts
/// an independent cursor, so any number of passes may be in flight at once.
#[derive(Clone)]
pub struct ObjectView {
    doc: Weak<NativeDoc>,
    node: Node,
}

impl ObjectView {
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

    /// Number of entries. Constant time; nothing is materialized.
    ///
    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn len(&self) -> Result<usize> {
        Ok(self.doc()?.obj_size(self.node))
    }

    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// The value stored under `key`, or `None` if there is no such entry.
    ///
    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed, or
    /// [`Error::StringExtraction`] if the value is an unreadable string.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let doc = self.doc()?;
        doc.obj_get(self.node, key.as_bytes())
            .map(|node| coerce(&doc, node))
            .transpose()
    }

    /// The value stored under `key`, or `default` unchanged on a miss.
    ///
    /// # Errors
    ///
    /// As for [`get`](Self::get); a miss is never an error.
    pub fn get_or(&self, key: &str, default: Value) -> Result<Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// The value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] on a miss, otherwise as for [`get`](Self::get).
    pub fn lookup(&self, key: &str) -> Result<Value> {
        self.get(key)?
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.doc()?.obj_get(self.node, key.as_bytes()).is_some())
    }

    /// Start a new pass over the entries.
    ///
    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed, or
    /// [`Error::IteratorInit`] if the node cannot be iterated as an object.
    pub fn iter(&self) -> Result<ObjectIter> {
        let doc = self.doc()?;
        let Some(cursor) = ObjCursor::init(&doc, self.node) else {
            tracing::trace!(node = self.node.index(), "object cursor init failed");
            return Err(Error::IteratorInit);
        };
        Ok(ObjectIter {
            doc: self.doc.clone(),
            cursor: Some(cursor),
        })
    }

    /// Keys in source order.
    ///
    /// # Errors
    ///
    /// As for [`iter`](Self::iter).
    pub fn keys(&self) -> Result<Keys> {
        self.iter().map(Keys)
    }

    /// Values in source order.
    ///
    /// # Errors
    ///
    /// As for [`iter`](Self::iter).
    pub fn values(&self) -> Result<Values> {
        self.iter().map(Values)
    }
}

impl PartialEq for ObjectView {
    /// Two views are equal when they address the same node of the same
    /// document.
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.doc, &other.doc) && self.node == other.node
    }
}

impl fmt::Debug for ObjectView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectView")
            .field("node", &self.node.index())
            .field("live", &self.is_live())
            .finish()
    }
}

/// Iterator over an object's entries, owning its own cursor.
///
/// If the document is closed mid-pass, the next step yields
/// [`Error::Closed`] and the iterator ends.
#[derive(Debug)]
pub struct ObjectIter {
    doc: Weak<NativeDoc>,
    /// `None` once exhausted or failed.
    cursor: Option<ObjCursor>,
}

impl Iterator for ObjectIter {
    type Item = Result<(String, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_none() {
            return None;
        }
        let Some(doc) = self.doc.upgrade() else {
            self.cursor = None;
            return Some(Err(Error::Closed));
        };
        let cursor = self.cursor.as_mut()?;
        let Some(key) = cursor.advance(&doc) else {
            self.cursor = None;
            return None;
        };
        Some(entry(&doc, key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.map_or(0, |c| c.remaining());
        (remaining, Some(remaining))
    }
}

fn entry(doc: &Rc<NativeDoc>, key: Node) -> Result<(String, Value)> {
    let name = extract_string(doc, key)?;
    let value = coerce(doc, ObjCursor::get_val(key))?;
    Ok((name, value))
}

/// Iterator over an object's keys. See [`ObjectView::keys`].
#[derive(Debug)]
pub struct Keys(ObjectIter);

impl Iterator for Keys {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|r| r.map(|(k, _)| k))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// Iterator over an object's values. See [`ObjectView::values`].
#[derive(Debug)]
pub struct Values(ObjectIter);

impl Iterator for Values {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|r| r.map(|(_, v)| v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use rstest::*;

    use crate::{Error, ReadOptions, Value, parse};

    fn object(src: &str) -> (crate::Document, super::ObjectView) {
        let doc = parse(src, ReadOptions::default()).unwrap();
        let view = doc.root().unwrap().as_object().cloned().unwrap();
        (doc, view)
    }

    #[rstest]
    #[timeout(Duration::from_millis(250))]
    fn lookup_hits_and_misses() {
        let (_doc, obj) = object(r#"{"a": 1, "b": "two"}"#);
        assert_eq!(obj.get("a").unwrap(), Some(Value::Int(1)));
        assert_eq!(obj.get("missing").unwrap(), None);
        assert_eq!(
            obj.get_or("missing", Value::Bool(false)).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(obj.lookup("b").unwrap(), Value::String("two".into()));
        assert!(matches!(
            obj.lookup("missing"),
            Err(Error::KeyNotFound(k)) if k == "missing"
        ));
        assert!(obj.contains_key("a").unwrap());
        assert!(!obj.contains_key("A").unwrap());
    }

    #[rstest]
    #[timeout(Duration::from_millis(250))]
    fn interleaved_iterators_are_independent() {
        let (_doc, obj) = object(r#"{"x": 1, "y": 2, "z": 3}"#);
        let mut first = obj.iter().unwrap();
        let mut second = obj.iter().unwrap();

        assert_eq!(first.next().unwrap().unwrap().0, "x");
        assert_eq!(first.next().unwrap().unwrap().0, "y");
        assert_eq!(second.next().unwrap().unwrap().0, "x");
        assert_eq!(first.next().unwrap().unwrap().0, "z");
        assert!(first.next().is_none());
        assert_eq!(second.next().unwrap().unwrap().0, "y");
        assert_eq!(second.size_hint(), (1, Some(1)));
    }

    #[rstest]
    #[timeout(Duration::from_millis(250))]
    fn keys_and_values_follow_source_order() {
        let (_doc, obj) = object(r#"{"b": 1, "a": [2], "c": null}"#);
        let keys: Vec<_> = obj.keys().unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(keys, ["b", "a", "c"]);
        let values: Vec<_> = obj.values().unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(values[0], Value::Int(1));
        assert!(values[1].is_array());
        assert!(values[2].is_null());
    }

    #[rstest]
    #[timeout(Duration::from_millis(250))]
    fn views_of_the_same_node_compare_equal() {
        let (_doc, obj) = object(r#"{"inner": {}}"#);
        let a = obj.lookup("inner").unwrap();
        let b = obj.lookup("inner").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Value::Object(obj.clone()));
    }

    #[rstest]
    #[timeout(Duration::from_millis(250))]
    fn closing_mid_iteration_ends_with_closed() {
        let (mut doc, obj) = object(r#"{"a": 1, "b": 2}"#);
        let mut it = obj.iter().unwrap();
        assert!(it.next().unwrap().is_ok());
        doc.close();
        assert!(matches!(it.next(), Some(Err(Error::Closed))));
        assert!(it.next().is_none());
        assert!(!obj.is_live());
        assert!(matches!(obj.len(), Err(Error::Closed)));
        assert!(matches!(obj.iter(), Err(Error::Closed)));
    }
}
