#![allow(clippy::struct_excessive_bools)]

/// Configuration forwarded to the native engine when a document is read.
///
/// The view layer never looks at these flags; they only change how the input
/// is turned into a native tape.
///
/// # Examples
///
/// ```rust
/// use jsonview::{ReadOptions, Value};
///
/// let options = ReadOptions {
///     number_as_raw: true,
///     ..Default::default()
/// };
/// let doc = jsonview::parse(r#"{"n": 1.50}"#, options).unwrap();
/// assert_eq!(doc.lookup("n").unwrap(), Value::String("1.50".into()));
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Whether to store every number as raw text instead of a typed number.
    ///
    /// Raw numbers coerce to [`Value::String`](crate::Value::String) holding
    /// the number exactly as written in the source, so `1.50` stays `"1.50"`
    /// and `1e3` stays `"1e3"`. The one exception is `-0`, read as `"0"`.
    ///
    /// # Default
    ///
    /// `false`
    pub number_as_raw: bool,

    /// Whether to store integers that do not fit in an `i64` as raw decimal
    /// text.
    ///
    /// This covers both signs and any number of digits. When `false`, such
    /// integers are widened to `f64` and may lose precision; integers too
    /// large for a finite `f64` fail to parse.
    ///
    /// # Default
    ///
    /// `false`
    pub bignum_as_raw: bool,

    /// Whether to accept input containing invalid UTF-8.
    ///
    /// Invalid sequences are replaced with U+FFFD before tokenizing. When
    /// `false`, such input fails to parse.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_invalid_unicode: bool,

    /// Whether to stop after the first complete JSON value.
    ///
    /// When `true`, anything following the first value is ignored, which
    /// allows reading the head of a concatenated or newline-delimited stream.
    ///
    /// ```json
    /// {"first": true} {"ignored": true}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub stop_when_done: bool,
}
