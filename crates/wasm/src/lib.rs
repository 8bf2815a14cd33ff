use offerready_core::{DrillPrompt, LessonError, RenderOptions};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Config
// ============================================================================

/// Reads `RenderOptions` from a JS object. `undefined`/`null` give the lesson defaults;
/// keys may be snake_case or camelCase.
fn parse_config(config: JsValue) -> Result<RenderOptions, LessonError> {
    if config.is_undefined() || config.is_null() {
        return Ok(RenderOptions::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| LessonError::InvalidOptions(e.to_string()))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&LessonError::Serialization(e.to_string()).to_string()))
}

// ============================================================================
// Render API Types
// ============================================================================

/// Result of rendering one lesson.
#[derive(Debug, Clone, Serialize)]
pub struct RenderLessonResult {
    /// HTML fragment.
    pub html: String,
    /// Mini Drill prompts in source order.
    pub prompts: Vec<DrillPrompt>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Messages for failures the renderer recovered from.
    pub errors: Vec<String>,
}

// ============================================================================
// Render API
// ============================================================================

/// Renders lesson markdown to HTML and extracts its Mini Drill prompts.
///
/// # Arguments
///
/// * `text` - Lesson markdown
/// * `config` - Optional `{ allowRawHtml, sanitize }` object (JsValue)
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { render_lesson } from './offerready_wasm';
///
/// const lesson = render_lesson('# EV\n\nEnterprise **value**.', { allowRawHtml: false });
/// // lesson.html === "<h1>EV</h1><p>Enterprise <strong>value</strong>.</p>"
/// ```
#[wasm_bindgen]
pub fn render_lesson(text: &str, config: JsValue) -> Result<JsValue, JsError> {
    let options = parse_config(config).map_err(|e| JsError::new(&e.to_string()))?;
    let lesson = offerready_core::render_lesson(text, &options);

    let result = RenderLessonResult {
        html: lesson.html,
        prompts: lesson.prompts,
        warnings: lesson.diagnostics.warnings.iter().map(ToString::to_string).collect(),
        errors: lesson.diagnostics.errors.iter().map(ToString::to_string).collect(),
    };
    to_js(&result)
}

/// Extracts the Mini Drill prompts as an array of `{ question, answer }` objects.
#[wasm_bindgen]
pub fn extract_drill_prompts(text: &str) -> Result<JsValue, JsError> {
    to_js(&offerready_core::extract_prompts(text))
}
