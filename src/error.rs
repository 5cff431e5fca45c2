//! Error types for spark-folio.
//!
//! Nothing here is user-visible. Errors are logged and the page degrades by
//! omission: the affected effect simply does not run.

use wasm_bindgen::JsValue;

/// Everything that can go wrong while wiring the page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// A required element is missing from the markup.
    #[error("required element `{0}` not found")]
    MissingElement(String),

    /// A browser or external library call threw.
    #[error("javascript error: {0}")]
    Js(String),

    /// The `data-folio-config` override could not be used.
    #[error("invalid page config: {0}")]
    Config(String),

    /// A chart or library option object failed to serialize.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PageError {
    /// Wrap a thrown JS value, keeping its string form when it has one.
    pub fn js(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        Self::js(value)
    }
}

/// Convenience Result type with PageError
pub type Result<T> = std::result::Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_message() {
        let err = PageError::MissingElement(".navbar".to_string());
        assert_eq!(err.to_string(), "required element `.navbar` not found");
    }

    #[test]
    fn test_serialize_error_converts() {
        let bad = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: PageError = bad.into();
        assert!(matches!(err, PageError::Serialize(_)));
    }
}
