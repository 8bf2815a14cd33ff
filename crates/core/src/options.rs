//! Render options shared by the library API and the host bindings.

use crate::LessonError;
use serde::Deserialize;

/// Options controlling how lesson markdown is turned into markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Pass raw HTML in the lesson text through untouched. When false, `&`, `<` and `>`
    /// are escaped before any markdown pass runs.
    #[serde(alias = "allowRawHtml")]
    pub allow_raw_html: bool,
    /// Strip script-capable elements, event-handler attributes and `javascript:` URLs
    /// from the rendered markup.
    pub sanitize: bool,
}

impl RenderOptions {
    /// Lesson defaults: raw HTML allowed, output sanitized.
    pub const fn lesson() -> Self {
        Self {
            allow_raw_html: true,
            sanitize: true,
        }
    }

    /// Exact substitution-pass output with no escaping and no sanitizing.
    pub const fn passthrough() -> Self {
        Self {
            allow_raw_html: true,
            sanitize: false,
        }
    }

    /// Treat the lesson text as untrusted: escape raw HTML before rendering.
    pub const fn escaped() -> Self {
        Self {
            allow_raw_html: false,
            sanitize: true,
        }
    }

    /// Decode options from a JSON value supplied by a host. `null` yields the defaults.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, LessonError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(Self::deserialize(value)?)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::lesson()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_decodes_to_defaults() {
        let options = RenderOptions::from_json(&serde_json::Value::Null).unwrap();
        assert_eq!(options, RenderOptions::lesson());
    }

    #[test]
    fn accepts_camel_case_alias() {
        let options = RenderOptions::from_json(&json!({ "allowRawHtml": false })).unwrap();
        assert!(!options.allow_raw_html);
        assert!(options.sanitize);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options = RenderOptions::from_json(&json!({ "sanitize": false })).unwrap();
        assert_eq!(options, RenderOptions::passthrough());
    }

    #[test]
    fn rejects_wrong_types() {
        let err = RenderOptions::from_json(&json!({ "sanitize": "yes" })).unwrap_err();
        assert!(matches!(err, LessonError::InvalidOptions(_)), "{err:?}");
    }
}
