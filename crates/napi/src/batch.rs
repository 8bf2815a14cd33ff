//! Batch processing types for parallel lesson rendering.

use crate::types::{LessonOptions, RenderLessonResult};
use napi_derive::napi;

/// A single lesson in a batch.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct LessonInput {
    /// Caller-chosen identifier (typically the lesson id).
    pub id: String,
    /// Lesson markdown.
    pub source: String,
}

/// Result for a single lesson in a batch.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct LessonBatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Rendered lesson. Always present; on failure it holds the escaped fallback.
    pub result: Option<RenderLessonResult>,
    /// First recovered failure, if any.
    pub error: Option<String>,
}

/// Statistics for batch processing.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Number of lessons processed.
    pub total: u32,
    /// Lessons rendered without errors.
    pub succeeded: u32,
    /// Lessons that fell back to escaped output.
    pub failed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to number of CPU cores.
    pub max_threads: Option<u32>,
    /// Rendering options applied to every lesson.
    pub options: Option<LessonOptions>,
}

/// Per-lesson results in input order, plus statistics.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchProcessingResult {
    /// Individual results for each input.
    pub results: Vec<LessonBatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}
