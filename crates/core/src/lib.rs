#![deny(missing_docs)]
//! OfferReady core: lesson markdown rendering, drill-prompt extraction and diagnostics.

/// Drill-prompt extraction from `## Mini Drill` sections.
pub mod drill;
/// Core error and diagnostic types.
pub mod error;
/// Combined lesson rendering.
pub mod lesson;
/// Markdown-subset renderer.
pub mod markdown;
/// Render options.
pub mod options;
/// HTML sanitizing for rendered markup.
pub mod sanitize;

pub use drill::{DrillPrompt, FALLBACK_ANSWER, extract_prompts, find_drill_section};
pub use error::{LessonError, ParseWarning, RecoverableError, RenderDiagnostics, SourceLocation};
pub use lesson::{RenderedLesson, render_lesson};
pub use markdown::{RenderOutput, render, render_with_options};
pub use options::RenderOptions;
