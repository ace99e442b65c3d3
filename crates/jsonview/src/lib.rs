//! Lazy, read-only views over an immutable parsed JSON document.
//!
//! Parsing produces a [`Document`] that owns a flat native tape of the whole
//! input. Nothing else is built up front: [`ObjectView`] and [`ArrayView`]
//! read entries from the tape when asked, and each access yields a
//! [`Value`] that is either a copied scalar or another view into the same
//! tape.
//!
//! ```rust
//! use jsonview::{ReadOptions, Value};
//!
//! let doc = jsonview::parse(
//!     r#"{"a": 1, "b": 2.5, "c": [true, null]}"#,
//!     ReadOptions::default(),
//! )?;
//! assert_eq!(doc.lookup("a")?, Value::Int(1));
//! assert_eq!(doc.lookup("b")?, Value::Float(2.5));
//!
//! let c = doc.lookup("c")?;
//! let c = c.as_array().unwrap();
//! assert_eq!(c.lookup(1)?, Value::Bool(true));
//! assert_eq!(c.get_or(3, Value::from("default"))?, Value::from("default"));
//! # Ok::<(), jsonview::Error>(())
//! ```
//!
//! Views never keep a document alive. Once it is closed, explicitly or by
//! going out of scope, every view reports [`Error::Closed`]. The scoped
//! entry points [`parse_with`] and [`open_with`] close the document before
//! they return.

mod array;
mod document;
mod error;
mod object;
mod options;
mod pointer;
mod root;
mod value;

#[cfg(feature = "fuzzing")]
pub mod native;
#[cfg(not(feature = "fuzzing"))]
mod native;

#[cfg(test)]
mod tests;

pub use array::{ArrayIter, ArrayView};
pub use document::{Document, open, open_with, parse, parse_with};
pub use error::{Error, Result};
pub use object::{Keys as ObjectKeys, ObjectIter, ObjectView, Values as ObjectValues};
pub use options::ReadOptions;
pub use root::{Entries, Index, Key, Keys, Root, Values};
pub use value::Value;
