//! Document ownership, lifecycle, and entry points.
//!
//! A [`Document`] is the only owner of a native tape and its allocator. Views
//! handed out by the document hold weak references, so closing the document
//! frees the tape immediately and every surviving view starts reporting
//! [`Error::Closed`].
//!
//! Release happens exactly once, on whichever comes first:
//! - an explicit [`Document::close`];
//! - the end of a scoped [`parse_with`]/[`open_with`] call;
//! - `Drop`, as a fallback for documents nobody closed.

use std::{path::Path, rc::Rc};

use crate::{
    error::{Error, Result},
    native::{Allocator, Kind, NativeDoc},
    options::ReadOptions,
    root::{Entries, Index, Keys, Root, Values},
    value::{Value, coerce},
};

/// A parsed JSON document whose root is an object or array.
///
/// All accessors delegate to the [`Root`] view and fail with
/// [`Error::Closed`] once the document is closed.
///
/// # Examples
///
/// ```
/// use jsonview::{ReadOptions, Value};
///
/// let mut doc = jsonview::parse(r#"{"name": "jsonview", "tags": ["a", "b"]}"#, ReadOptions::default())?;
/// assert_eq!(doc.lookup("name")?, Value::String("jsonview".into()));
///
/// let tags = doc.lookup("tags")?;
/// let tags = tags.as_array().unwrap();
/// assert_eq!(tags.lookup(2)?, Value::String("b".into()));
///
/// doc.close();
/// assert!(tags.len().is_err());
/// # Ok::<(), jsonview::Error>(())
/// ```
#[derive(Debug)]
pub struct Document {
    native: Option<Rc<NativeDoc>>,
}

impl Document {
    fn from_bytes(input: &[u8], options: ReadOptions) -> Result<Self> {
        let native = NativeDoc::parse(input, Allocator::with_capacity(input.len()), &options)?;
        let kind = native.kind(native.root());
        if !matches!(kind, Kind::Obj | Kind::Arr) {
            return Err(Error::InvalidRoot { found: kind.name() });
        }
        tracing::debug!(
            bytes = input.len(),
            nodes = native.node_count(),
            root = kind.name(),
            "parsed document"
        );
        Ok(Self {
            native: Some(Rc::new(native)),
        })
    }

    fn native(&self) -> Result<&Rc<NativeDoc>> {
        self.native.as_ref().ok_or(Error::Closed)
    }

    /// Whether [`close`](Self::close) has not run yet.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.native.is_some()
    }

    /// Release the native tape and allocator.
    ///
    /// Calling `close` on a closed document does nothing.
    pub fn close(&mut self) {
        if let Some(native) = self.native.take() {
            tracing::debug!(nodes = native.node_count(), "closing document");
        }
    }

    /// The root view.
    ///
    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn root(&self) -> Result<Root> {
        let native = self.native()?;
        match coerce(native, native.root())? {
            Value::Object(o) => Ok(Root::Object(o)),
            Value::Array(a) => Ok(Root::Array(a)),
            other => Err(Error::InvalidRoot {
                found: other.type_name(),
            }),
        }
    }

    /// Total number of native nodes, object keys included.
    ///
    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn node_count(&self) -> Result<usize> {
        Ok(self.native()?.node_count())
    }

    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn len(&self) -> Result<usize> {
        self.root()?.len()
    }

    /// # Errors
    ///
    /// [`Error::Closed`] if the document has been closed.
    pub fn is_empty(&self) -> Result<bool> {
        self.root()?.is_empty()
    }

    /// # Errors
    ///
    /// See [`Root::keys`].
    pub fn keys(&self) -> Result<Keys> {
        self.root()?.keys()
    }

    /// # Errors
    ///
    /// See [`Root::values`].
    pub fn values(&self) -> Result<Values> {
        self.root()?.values()
    }

    /// # Errors
    ///
    /// See [`Root::iter`].
    pub fn iter(&self) -> Result<Entries> {
        self.root()?.iter()
    }

    /// # Errors
    ///
    /// See [`Root::get`].
    pub fn get<I: Index>(&self, index: I) -> Result<Option<Value>> {
        self.root()?.get(index)
    }

    /// # Errors
    ///
    /// See [`Root::get_or`].
    pub fn get_or<I: Index>(&self, index: I, default: Value) -> Result<Value> {
        self.root()?.get_or(index, default)
    }

    /// # Errors
    ///
    /// See [`Root::lookup`].
    pub fn lookup<I: Index>(&self, index: I) -> Result<Value> {
        self.root()?.lookup(index)
    }

    /// Resolve an RFC 6901 JSON Pointer from the root.
    ///
    /// # Errors
    ///
    /// See [`Value::pointer`].
    pub fn pointer(&self, pointer: &str) -> Result<Option<Value>> {
        Value::from(self.root()?).pointer(pointer)
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        if let Some(native) = self.native.take() {
            tracing::debug!(
                nodes = native.node_count(),
                "document dropped while open, releasing implicitly"
            );
        }
    }
}

/// Parse `text` into an open [`Document`].
///
/// # Errors
///
/// [`Error::Parse`] for malformed input, [`Error::InvalidRoot`] when the root
/// is a scalar.
pub fn parse(text: impl AsRef<[u8]>, options: ReadOptions) -> Result<Document> {
    Document::from_bytes(text.as_ref(), options)
}

/// Read and parse the file at `path`.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be read; otherwise as for [`parse`].
pub fn open(path: impl AsRef<Path>, options: ReadOptions) -> Result<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read document file");
    Document::from_bytes(&bytes, options)
}

/// Parse `text`, run `f` on the document, and close it before returning.
///
/// The document is closed whether `f` returns `Ok`, returns `Err`, or
/// panics. Views that escape `f` report [`Error::Closed`] afterwards.
///
/// # Examples
///
/// ```
/// use jsonview::ReadOptions;
///
/// let n = jsonview::parse_with("[1, 2, 3]", ReadOptions::default(), |doc| doc.len())?;
/// assert_eq!(n, 3);
/// # Ok::<(), jsonview::Error>(())
/// ```
///
/// # Errors
///
/// Any error from [`parse`], or the error returned by `f`.
pub fn parse_with<T, F>(text: impl AsRef<[u8]>, options: ReadOptions, f: F) -> Result<T>
where
    F: FnOnce(&Document) -> Result<T>,
{
    scoped(parse(text, options)?, f)
}

/// Open the file at `path`, run `f` on the document, and close it before
/// returning. See [`parse_with`].
///
/// # Errors
///
/// Any error from [`open`], or the error returned by `f`.
pub fn open_with<T, F>(path: impl AsRef<Path>, options: ReadOptions, f: F) -> Result<T>
where
    F: FnOnce(&Document) -> Result<T>,
{
    scoped(open(path, options)?, f)
}

fn scoped<T, F>(mut doc: Document, f: F) -> Result<T>
where
    F: FnOnce(&Document) -> Result<T>,
{
    let out = f(&doc);
    doc.close();
    out
}
