use crate::types::{Diagnostics, DrillPromptEntry, LessonOptions, RenderLessonResult, WarningEntry};
use offerready_core::{DrillPrompt, ParseWarning, RenderDiagnostics, RenderOptions, RenderedLesson};

/// Converts `LessonOptions` to `RenderOptions`.
pub fn to_render_options(opts: Option<LessonOptions>) -> RenderOptions {
    let defaults = RenderOptions::lesson();
    match opts {
        Some(o) => RenderOptions {
            allow_raw_html: o.allow_raw_html.unwrap_or(defaults.allow_raw_html),
            sanitize: o.sanitize.unwrap_or(defaults.sanitize),
        },
        None => defaults,
    }
}

fn warning_type(warning: &ParseWarning) -> &'static str {
    match warning {
        ParseWarning::UnclosedCodeFence { .. } => "unclosed_code_fence",
        ParseWarning::UnsafeMarkupRemoved { .. } => "unsafe_markup_removed",
    }
}

fn convert_warning(warning: &ParseWarning) -> WarningEntry {
    WarningEntry {
        warning_type: warning_type(warning).to_string(),
        line: warning.location().map(|loc| loc.line as u32),
        message: warning.to_string(),
    }
}

/// Converts core diagnostics to their NAPI shape.
pub fn convert_diagnostics(diagnostics: &RenderDiagnostics) -> Diagnostics {
    Diagnostics {
        warnings: diagnostics.warnings.iter().map(convert_warning).collect(),
        errors: diagnostics.errors.iter().map(ToString::to_string).collect(),
    }
}

/// Converts drill prompts to their NAPI shape.
pub fn convert_prompts(prompts: Vec<DrillPrompt>) -> Vec<DrillPromptEntry> {
    prompts
        .into_iter()
        .map(|p| DrillPromptEntry {
            question: p.question,
            answer: p.answer,
        })
        .collect()
}

impl From<RenderedLesson> for RenderLessonResult {
    fn from(lesson: RenderedLesson) -> Self {
        Self {
            diagnostics: convert_diagnostics(&lesson.diagnostics),
            html: lesson.html,
            prompts: convert_prompts(lesson.prompts),
        }
    }
}
