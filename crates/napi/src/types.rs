//! NAPI-exposed data structures.

use napi_derive::napi;

/// Rendering switches accepted from JavaScript. Unset fields use the lesson defaults.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct LessonOptions {
    /// Pass raw HTML in the lesson through. Defaults to true.
    pub allow_raw_html: Option<bool>,
    /// Strip scripts, event handlers and `javascript:` URLs. Defaults to true.
    pub sanitize: Option<bool>,
}

/// One drill question with its answer.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillPromptEntry {
    /// Question text.
    pub question: String,
    /// Answer text.
    pub answer: String,
}

/// Warning returned from Rust
#[napi(object)]
#[derive(Debug, Clone)]
pub struct WarningEntry {
    /// Warning type (e.g., "unclosed_code_fence")
    pub warning_type: String,
    /// Line number where the warning occurred, if it has one
    pub line: Option<u32>,
    /// Human-readable message
    pub message: String,
}

/// Diagnostics returned with a rendered lesson
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Non-fatal warnings
    pub warnings: Vec<WarningEntry>,
    /// Failures the renderer recovered from
    pub errors: Vec<String>,
}

/// Rendered HTML, drill prompts and diagnostics for one lesson.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct RenderLessonResult {
    /// HTML fragment.
    pub html: String,
    /// Mini Drill prompts in source order.
    pub prompts: Vec<DrillPromptEntry>,
    /// Render diagnostics.
    pub diagnostics: Diagnostics,
}
