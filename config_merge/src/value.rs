//! Shape classification for tree values.

use std::fmt;

use serde_json::Value;

/// Runtime shape of a tree node.
///
/// Two scalar nodes are assignable to one another only when they share a
/// kind. All JSON numbers share [`ValueKind::Number`], so integers and floats
/// overwrite each other freely.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueKind {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Any JSON number.
    Number,
    /// A string scalar.
    String,
    /// An ordered list of values.
    Sequence,
    /// A string-keyed mapping.
    Mapping,
}

impl ValueKind {
    /// Classify `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use config_merge::ValueKind;
    /// use serde_json::json;
    ///
    /// assert_eq!(ValueKind::of(&json!([1, 2])), ValueKind::Sequence);
    /// assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Number);
    /// ```
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
