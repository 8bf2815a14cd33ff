//! One-call rendering of a lesson page.

use crate::drill::{DrillPrompt, extract_prompts};
use crate::error::RenderDiagnostics;
use crate::markdown::render_with_options;
use crate::options::RenderOptions;

/// Everything a lesson page needs from a lesson body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedLesson {
    /// Rendered lesson markup.
    pub html: String,
    /// Drill prompts for the self-test widget.
    pub prompts: Vec<DrillPrompt>,
    /// Non-fatal findings from rendering.
    pub diagnostics: RenderDiagnostics,
}

/// Renders `text` and extracts its drill prompts from the same source.
pub fn render_lesson(text: &str, options: &RenderOptions) -> RenderedLesson {
    let output = render_with_options(text, options);
    let prompts = extract_prompts(text);
    log::debug!(
        "Rendered lesson: {} bytes of markup, {} drill prompts, {} diagnostics",
        output.html.len(),
        prompts.len(),
        output.diagnostics.count()
    );

    RenderedLesson {
        html: output.html,
        prompts,
        diagnostics: output.diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markup_and_prompts_together() {
        let lesson = render_lesson(
            "# EV\n\n## Mini Drill\n1. **What is EV?** Equity plus net debt.",
            &RenderOptions::lesson(),
        );
        assert!(lesson.html.starts_with("<h1>EV</h1>"));
        assert_eq!(
            lesson.prompts,
            vec![DrillPrompt::new("What is EV?", "Equity plus net debt.")]
        );
        assert!(!lesson.diagnostics.has_any());
    }

    #[test]
    fn lesson_without_drill_has_no_prompts() {
        let lesson = render_lesson("Plain text", &RenderOptions::lesson());
        assert_eq!(lesson.html, "<p>Plain text</p>");
        assert!(lesson.prompts.is_empty());
    }
}
