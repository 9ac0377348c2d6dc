//! Generic value types produced by the parser.
//!
//! This module defines the [`Value`] enum, the closed set of variants every
//! parse produces, and provides the compact JSON writer used by its
//! [`Display`](core::fmt::Display) implementation.

use std::collections::BTreeMap;

/// Ordered map used for [`Value::Object`]. Duplicate keys resolve by
/// last-write-wins at insertion time.
pub type Map = BTreeMap<String, Value>;
/// Backing storage for [`Value::Array`].
pub type Array = Vec<Value>;

/// A parsed JSON or SEN value.
///
/// Numbers are split into three variants: [`Int`] for anything that fits an
/// `i64`, [`Float`] for values with a fraction or exponent, and [`BigNumber`]
/// for literals that exceed `i64`/`f64` precision. A `BigNumber` keeps the
/// source text verbatim and is never silently truncated.
///
/// # Examples
///
/// ```
/// use jsen::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [`Int`]: Value::Int
/// [`Float`]: Value::Float
/// [`BigNumber`]: Value::BigNumber
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The `null` literal.
    Null,
    /// The `true` and `false` literals.
    Bool(bool),
    /// An integer within `i64` range.
    Int(i64),
    /// A number with a fraction or exponent.
    Float(f64),
    /// A numeric literal kept as text because it exceeds safe precision.
    BigNumber(String),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Array(Array),
    /// A key/value map with unique keys.
    Object(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
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
        Self::String(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
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

    /// Returns `true` if the value is [`Int`], [`Float`], or [`BigNumber`].
    ///
    /// [`Int`]: Value::Int
    /// [`Float`]: Value::Float
    /// [`BigNumber`]: Value::BigNumber
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(..) | Self::Float(..) | Self::BigNumber(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns the `bool` payload if the value is [`Bool`].
    ///
    /// [`Bool`]: Value::Bool
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload if the value is [`Int`].
    ///
    /// [`Int`]: Value::Int
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns a float view of the value for [`Int`] and [`Float`].
    ///
    /// [`Int`]: Value::Int
    /// [`Float`]: Value::Float
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string payload for [`String`] and the verbatim literal for
    /// [`BigNumber`].
    ///
    /// [`String`]: Value::String
    /// [`BigNumber`]: Value::BigNumber
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::BigNumber(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the map if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }
}

/// Escapes control characters in a string for inclusion in a JSON string
/// literal.
///
/// Replaces quotes, backslashes, control characters (<= U+001F), and Unicode
/// line separators with their JSON escape sequences.
pub(crate) fn write_escaped_string<W: core::fmt::Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{0008}' => f.write_str("\\b")?,
            '\u{000C}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // Escape the Unicode line separators some downstream consumers
            // cannot carry unescaped.
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            c if c.is_ascii_control() || c.is_control() && (c as u32) <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

pub(crate) fn escape_string(src: &str) -> String {
    let mut result = String::with_capacity(src.len() + 2);
    // Writing to a String cannot fail.
    let _ = write_escaped_string(src, &mut result);
    result
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(n) => {
                if n.is_finite() {
                    // Debug formatting keeps a fraction or exponent on every
                    // finite float, so the text reparses to the same variant.
                    write!(f, "{n:?}")
                } else {
                    f.write_str("null")
                }
            }
            Value::BigNumber(text) => f.write_str(text),
            Value::String(s) => {
                write!(f, "\"{}\"", escape_string(s))
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "\"{}\":{}", escape_string(k), v)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Map, Value};

    #[test]
    fn display_scalars() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-42).to_string(), "-42");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(1e300).to_string(), "1e300");
        assert_eq!(
            Value::BigNumber("9223372036854775808".into()).to_string(),
            "9223372036854775808"
        );
    }

    #[test]
    fn display_escapes() {
        assert_eq!(
            Value::String("a\"b\\c\nd".into()).to_string(),
            r#""a\"b\\c\nd""#
        );
        assert_eq!(Value::String("\u{1}".into()).to_string(), "\"\\u0001\"");
    }

    #[test]
    fn display_containers() {
        let mut map = Map::new();
        map.insert("a".into(), Value::Int(1));
        map.insert("b".into(), Value::Array(vec![Value::Null, Value::Bool(false)]));
        assert_eq!(
            Value::Object(map).to_string(),
            r#"{"a":1,"b":[null,false]}"#
        );
    }
}
