//! Values produced by lazy access.
//!
//! This module defines the [`Value`] enum returned by every lookup and
//! iteration step, and the coercion that maps a native node to it. Scalars
//! are copied out of the document; containers come back as new views that
//! alias the same native tree.

use std::rc::Rc;

use bstr::ByteSlice;

use crate::{
    array::ArrayView,
    error::{Error, Result},
    native::{NativeDoc, Node},
    object::ObjectView,
};

/// A JSON value as seen through a document view.
///
/// - Null
/// - Boolean
/// - Integer (numbers written without a fraction or exponent)
/// - Float
/// - String
/// - Object (lazy)
/// - Array (lazy)
///
/// `1` and `1.0` in the source produce [`Int`](Value::Int) and
/// [`Float`](Value::Float) respectively. Object and array values are views
/// into the owning [`Document`](crate::Document); their contents are read
/// only when accessed and only while the document is open.
///
/// # Examples
///
/// ```
/// use jsonview::{ReadOptions, Value};
///
/// let doc = jsonview::parse(r#"{"a": 1, "b": [true]}"#, ReadOptions::default()).unwrap();
/// assert_eq!(doc.lookup("a").unwrap(), Value::Int(1));
/// let b = doc.lookup("b").unwrap();
/// assert_eq!(b.as_array().unwrap().len().unwrap(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// JSON `null`.
    #[default]
    Null,
    /// JSON `true` or `false`.
    Bool(bool),
    /// A number written without fraction or exponent that fits in `i64`.
    Int(i64),
    /// Any other number.
    Float(f64),
    /// A string, or a number read as raw text.
    String(String),
    /// A lazy view of a nested object.
    Object(ObjectView),
    /// A lazy view of a nested array.
    Array(ArrayView),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<ObjectView> for Value {
    fn from(v: ObjectView) -> Self {
        Self::Object(v)
    }
}

impl From<ArrayView> for Value {
    fn from(v: ArrayView) -> Self {
        Self::Array(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonview::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Bool(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Bool`].
    ///
    /// [`Bool`]: Value::Bool
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    /// Returns `true` if the value is [`Int`] or [`Float`].
    ///
    /// [`Int`]: Value::Int
    /// [`Float`]: Value::Float
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonview::Value;
    ///
    /// assert!(Value::Int(1).is_number());
    /// assert!(Value::Float(1.0).is_number());
    /// assert!(!Value::String("1".into()).is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(..) | Self::Float(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is an [`Object`] view.
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns `true` if the value is an [`Array`] view.
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// The boolean, if this is a [`Bool`](Value::Bool).
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is an [`Int`](Value::Int). Floats are not truncated.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric value as `f64`, widening integers.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonview::Value;
    ///
    /// assert_eq!(Value::Int(2).as_f64(), Some(2.0));
    /// assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
    /// assert_eq!(Value::Null.as_f64(), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if this is a [`String`](Value::String).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The view, if this is an [`Object`](Value::Object).
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectView> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The view, if this is an [`Array`](Value::Array).
    #[must_use]
    pub fn as_array(&self) -> Option<&ArrayView> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }
}

/// Classify `node` and produce its value.
///
/// Strings and raw numbers are copied out of the native buffer here; a
/// failed extraction returns an error and no value.
pub(crate) fn coerce(doc: &Rc<NativeDoc>, node: Node) -> Result<Value> {
    if doc.is_str(node) || doc.is_raw(node) {
        return extract_string(doc, node).map(Value::String);
    }
    let value = if doc.is_num(node) {
        if doc.is_real(node) {
            doc.get_real(node).map_or(Value::Null, Value::Float)
        } else {
            doc.get_int(node).map_or(Value::Null, Value::Int)
        }
    } else if doc.is_bool(node) {
        doc.get_bool(node).map_or(Value::Null, Value::Bool)
    } else if doc.is_obj(node) {
        Value::Object(ObjectView::new(Rc::downgrade(doc), node))
    } else if doc.is_arr(node) {
        Value::Array(ArrayView::new(Rc::downgrade(doc), node))
    } else {
        Value::Null
    };
    Ok(value)
}

/// Copy the bytes of a string or raw node into an owned `String`.
pub(crate) fn extract_string(doc: &NativeDoc, node: Node) -> Result<String> {
    let bytes = doc.get_str(node).ok_or(Error::StringExtraction)?;
    let s = bytes.to_str().map_err(|_| Error::StringExtraction)?;
    Ok(s.to_owned())
}
