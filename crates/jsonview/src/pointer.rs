//! RFC 6901 JSON Pointer resolution over lazy views.
//!
//! Only the containers along the path are touched; the value at the end is
//! coerced once. Array tokens are 0-based as the RFC requires, unlike the
//! 1-based ordinals of [`ArrayView::get`](crate::ArrayView::get).

use std::borrow::Cow;

use crate::{error::Result, value::Value};

impl Value {
    /// Look up a value by JSON Pointer.
    ///
    /// `""` addresses the value itself. A pointer that does not start with
    /// `/`, names a missing key, or uses an invalid array token resolves to
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonview::{ReadOptions, Value};
    ///
    /// let doc = jsonview::parse(r#"{"a/b": [{"~k": 7}]}"#, ReadOptions::default())?;
    /// assert_eq!(doc.pointer("/a~1b/0/~0k")?, Some(Value::Int(7)));
    /// assert_eq!(doc.pointer("/a~1b/1")?, None);
    /// # Ok::<(), jsonview::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::Closed`](crate::Error::Closed) if a container on the path
    /// belongs to a closed document.
    pub fn pointer(&self, pointer: &str) -> Result<Option<Value>> {
        if pointer.is_empty() {
            return Ok(Some(self.clone()));
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Ok(None);
        };

        let mut current = self.clone();
        for token in rest.split('/').map(unescape) {
            let next = match &current {
                Value::Object(o) => o.get(&token)?,
                Value::Array(a) => match parse_index(&token).and_then(|i| i.checked_add(1)) {
                    Some(ordinal) => a.get(ordinal)?,
                    None => None,
                },
                _ => None,
            };
            match next {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

fn unescape(token: &str) -> Cow<'_, str> {
    if token.contains('~') {
        Cow::Owned(token.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(token)
    }
}

/// Array tokens are plain decimal without leading zeros; `-` never resolves.
fn parse_index(token: &str) -> Option<usize> {
    if token.starts_with('+') || (token.len() > 1 && token.starts_with('0')) {
        return None;
    }
    token.parse().ok()
}
