//! Conversion of merged trees into typed configuration.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ComposeError;

/// Deserialise a merged tree into `T`.
///
/// # Errors
///
/// Returns [`ComposeError::Deserialize`] when `value` does not fit `T`.
///
/// # Examples
///
/// ```rust
/// use config_merge::from_value;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct App { port: u16 }
///
/// let app: App = from_value(json!({"port": 8080}))?;
/// assert_eq!(app.port, 8080);
///
/// let err = from_value::<App>(json!({"port": "eighty"})).unwrap_err();
/// assert!(matches!(err, config_merge::ComposeError::Deserialize(_)));
/// # Ok::<_, config_merge::ComposeError>(())
/// ```
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ComposeError> {
    Ok(serde_json::from_value(value)?)
}
