#![deny(missing_docs)]
//! Node.js bindings that surface OfferReady's lesson renderer and drill extractor.

use napi_derive::napi;
use offerready_core::{extract_prompts, render_lesson};

/// Batch processing types.
pub mod batch;
mod convert;
/// NAPI-exposed data structures.
pub mod types;
pub use batch::*;
pub use types::*;

use convert::{convert_prompts, to_render_options};

/// Renders lesson markdown to HTML and extracts its Mini Drill prompts.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const { renderLesson } = require('offerready-napi');
///
/// const lesson = renderLesson('# EV\n\n## Mini Drill\n1. **What is EV?** Equity plus net debt.');
/// console.log(lesson.html, lesson.prompts.length);
/// ```
#[napi(js_name = "renderLesson")]
pub fn render_lesson_napi(text: String, options: Option<LessonOptions>) -> RenderLessonResult {
    render_lesson(&text, &to_render_options(options)).into()
}

/// Extracts the Mini Drill prompts from lesson markdown without rendering it.
#[napi(js_name = "extractDrillPrompts")]
pub fn extract_drill_prompts_napi(text: String) -> Vec<DrillPromptEntry> {
    convert_prompts(extract_prompts(&text))
}

/// Renders many lessons in parallel.
///
/// Rendering never fails outright. A lesson whose sanitizer pass failed still gets its
/// escaped fallback in `result` and is counted in `stats.failed` with the message in
/// `error`. Results keep input order.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const { renderLessonBatch } = require('offerready-napi');
///
/// const result = renderLessonBatch(
///   [{ id: 'ev', source: '# EV' }, { id: 'dcf', source: '# DCF' }],
///   { maxThreads: 4 },
/// );
/// console.log(`Rendered ${result.stats.total} lessons in ${result.stats.processingTimeMs}ms`);
/// ```
#[napi(js_name = "renderLessonBatch")]
pub fn render_lesson_batch(
    inputs: Vec<LessonInput>,
    options: Option<BatchOptions>,
) -> BatchProcessingResult {
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    let start = Instant::now();
    let opts = options.unwrap_or_default();
    let render_options = to_render_options(opts.options);

    let pool = opts.max_threads.and_then(|max_threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads as usize)
            .build()
            .map_err(|e| log::warn!("Falling back to the global thread pool: {e}"))
            .ok()
    });

    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |input: LessonInput| -> LessonBatchResult {
        let lesson = render_lesson(&input.source, &render_options);
        let error = lesson.diagnostics.errors.first().map(ToString::to_string);
        if error.is_some() {
            failed.fetch_add(1, Ordering::Relaxed);
        } else {
            succeeded.fetch_add(1, Ordering::Relaxed);
        }
        LessonBatchResult {
            id: input.id,
            result: Some(lesson.into()),
            error,
        }
    };

    let results: Vec<LessonBatchResult> = if let Some(pool) = pool {
        pool.install(|| inputs.into_par_iter().map(process_input).collect())
    } else {
        inputs.into_par_iter().map(process_input).collect()
    };

    let elapsed = start.elapsed();
    log::debug!("Rendered {total} lessons in {elapsed:?}");

    BatchProcessingResult {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
        },
    }
}
