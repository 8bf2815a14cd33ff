//! Markdown-subset renderer for lesson bodies.
//!
//! Rendering is a fixed sequence of global textual substitutions, not a parser. Later
//! passes see the markup produced by earlier ones, so pass order is part of the output
//! format: bold runs before italic, emphasis runs before code, and the list and paragraph
//! passes look at tags emitted upstream.

use crate::error::{ParseWarning, RecoverableError, RenderDiagnostics, SourceLocation};
use crate::options::RenderOptions;
use crate::sanitize::{needs_sanitizing, sanitize_markup};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

const FENCE: &str = "```";

static HEADER_3: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^### (.*)$"));
static HEADER_2: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^## (.*)$"));
static HEADER_1: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^# (.*)$"));

static BOLD_STARS: Lazy<Regex> = Lazy::new(|| pattern(r"\*\*(.*?)\*\*"));
static BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| pattern(r"__(.*?)__"));
static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| pattern(r"\*(.*?)\*"));
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| pattern(r"_(.*?)_"));

static FENCED_CODE: Lazy<Regex> = Lazy::new(|| pattern(r"(?s)```(.*?)```"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| pattern(r"`(.*?)`"));

static BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^> (.*)$"));
static ESCAPED_BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^&gt; (.*)$"));

static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^- (.*)$"));
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^[0-9]+\. (.*)$"));

static PARAGRAPH_BEFORE_BLOCK: Lazy<Regex> =
    Lazy::new(|| pattern(r"<p>\s*<(h[1-6]|ul|ol|blockquote|pre)"));
static PARAGRAPH_AFTER_BLOCK: Lazy<Regex> =
    Lazy::new(|| pattern(r"</(h[1-6]|ul|ol|blockquote|pre)>\s*</p>"));

fn pattern(source: &str) -> Regex {
    Regex::new(source).unwrap_or_else(|err| panic!("invalid render pattern {source:?}: {err}"))
}

/// Result of rendering a lesson body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// Rendered markup.
    pub html: String,
    /// Non-fatal findings collected while rendering.
    pub diagnostics: RenderDiagnostics,
}

/// Renders lesson markdown with the default [`RenderOptions`].
///
/// Never fails: empty or malformed input still produces a (possibly empty) string.
///
/// ```
/// use offerready_core::markdown::render;
///
/// assert_eq!(render("# Title"), "<h1>Title</h1>");
/// assert_eq!(
///     render("**bold** and *italic*"),
///     "<strong>bold</strong> and <em>italic</em>"
/// );
/// ```
pub fn render(text: &str) -> String {
    render_with_options(text, &RenderOptions::default()).html
}

/// Renders lesson markdown and reports diagnostics alongside the markup.
pub fn render_with_options(text: &str, options: &RenderOptions) -> RenderOutput {
    let mut diagnostics = RenderDiagnostics::new();
    let normalized = normalize_line_endings(text);
    scan_code_fences(&normalized, &mut diagnostics);

    let source: Cow<'_, str> = if options.allow_raw_html {
        Cow::Borrowed(normalized.as_ref())
    } else {
        html_escape::encode_text(normalized.as_ref())
    };

    let mut html = apply_passes(&source, !options.allow_raw_html);

    if options.sanitize && needs_sanitizing(&html) {
        html = match sanitize_markup(&html) {
            Ok(sanitized) => {
                for description in sanitized.removed {
                    log::warn!("Removed unsafe markup from lesson: {}", description);
                    diagnostics.add_warning(ParseWarning::UnsafeMarkupRemoved { description });
                }
                sanitized.html
            }
            Err(err) => {
                log::warn!("Sanitizer failed, falling back to escaped text: {}", err);
                diagnostics.add_error(RecoverableError::error(err.to_string()));
                format!("<p>{}</p>", html_escape::encode_text(normalized.as_ref()))
            }
        };
    }

    RenderOutput { html, diagnostics }
}

fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Fences pair up left to right, exactly as the fenced-code pass consumes them, so an odd
/// count leaves the last opener unmatched.
fn scan_code_fences(text: &str, diagnostics: &mut RenderDiagnostics) {
    let fences: Vec<usize> = text.match_indices(FENCE).map(|(idx, _)| idx).collect();
    if fences.len() % 2 == 0 {
        return;
    }
    if let Some(&offset) = fences.last() {
        let context: String = text[offset..]
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(40)
            .collect();
        diagnostics.add_warning(ParseWarning::UnclosedCodeFence {
            location: SourceLocation::from_offset(text, offset),
            context,
        });
    }
}

fn apply_passes(source: &str, escaped: bool) -> String {
    let html = substitute(source.to_string(), &HEADER_3, "<h3>${1}</h3>");
    let html = substitute(html, &HEADER_2, "<h2>${1}</h2>");
    let html = substitute(html, &HEADER_1, "<h1>${1}</h1>");

    let html = substitute(html, &BOLD_STARS, "<strong>${1}</strong>");
    let html = substitute(html, &BOLD_UNDERSCORES, "<strong>${1}</strong>");
    let html = substitute(html, &ITALIC_STAR, "<em>${1}</em>");
    let html = substitute(html, &ITALIC_UNDERSCORE, "<em>${1}</em>");

    let html = substitute(html, &FENCED_CODE, "<pre><code>${1}</code></pre>");
    let html = substitute(html, &INLINE_CODE, "<code>${1}</code>");

    let quote = if escaped {
        &ESCAPED_BLOCKQUOTE
    } else {
        &BLOCKQUOTE
    };
    let html = substitute(html, quote, "<blockquote><p>${1}</p></blockquote>");

    let html = substitute(html, &UNORDERED_ITEM, "<li>${1}</li>");
    let html = substitute(html, &ORDERED_ITEM, "<li>${1}</li>");
    let html = html.replace("</li>\n<li>", "</li><li>");
    let html = wrap_list_runs(&html);

    let html = split_paragraphs(&html);

    let html = html.replace("<p></p>", "");
    let html = substitute(html, &PARAGRAPH_BEFORE_BLOCK, "<${1}");
    let html = substitute(html, &PARAGRAPH_AFTER_BLOCK, "</${1}>");

    html.replace('\n', "<br />")
        .replace("<br /><br />", "</p><p>")
}

fn substitute(html: String, pattern: &Regex, replacement: &str) -> String {
    if pattern.is_match(&html) {
        pattern.replace_all(&html, replacement).into_owned()
    } else {
        html
    }
}

/// Wraps each run of adjacent `<li>` items in a `<ul>` unless the run already sits
/// directly inside a list container. Ordered and unordered items share the container.
fn wrap_list_runs(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + 16);
    let mut cursor = 0;

    while let Some(offset) = html[cursor..].find("<li>") {
        let start = cursor + offset;
        let Some(end) = list_run_end(html, start) else {
            break;
        };

        out.push_str(&html[cursor..start]);
        let run = &html[start..end];
        if is_inside_list(&html[..start]) || run.contains("<ul>") || run.contains("<ol>") {
            out.push_str(run);
        } else {
            out.push_str("<ul>");
            out.push_str(run);
            out.push_str("</ul>");
        }
        cursor = end;
    }

    out.push_str(&html[cursor..]);
    out
}

/// Finds the end of the item run starting at `start`: the first `</li>` that is not
/// followed (after optional whitespace) by another `<li>`.
fn list_run_end(html: &str, start: usize) -> Option<usize> {
    let mut search = start;
    loop {
        let close = search + html[search..].find("</li>")?;
        let end = close + "</li>".len();
        if !html[end..].trim_start().starts_with("<li>") {
            return Some(end);
        }
        search = end;
    }
}

fn is_inside_list(before: &str) -> bool {
    let before = before.trim_end();
    before.ends_with("<ul>") || before.ends_with("<ol>")
}

/// Turns blank lines into paragraph boundaries unless the next block already starts with
/// a tag, then wraps the whole result in one paragraph when it does not start with a tag.
fn split_paragraphs(html: &str) -> String {
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len() + 16);
    let mut copied = 0;
    let mut idx = 0;

    while idx + 1 < bytes.len() {
        if bytes[idx] == b'\n' && bytes[idx + 1] == b'\n' && bytes.get(idx + 2) != Some(&b'<') {
            out.push_str(&html[copied..idx]);
            out.push_str("</p><p>");
            idx += 2;
            copied = idx;
        } else {
            idx += 1;
        }
    }
    out.push_str(&html[copied..]);

    if out.starts_with('<') {
        out
    } else {
        format!("<p>{out}</p>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> String {
        render_with_options(text, &RenderOptions::passthrough()).html
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn header_levels_match_longest_prefix_first() {
        assert_eq!(raw("# Title"), "<h1>Title</h1>");
        assert_eq!(raw("## Section"), "<h2>Section</h2>");
        assert_eq!(raw("### Detail"), "<h3>Detail</h3>");
    }

    #[test]
    fn header_requires_space_after_hashes() {
        assert_eq!(raw("#hashtag"), "<p>#hashtag</p>");
    }

    #[test]
    fn bold_and_italic_spans() {
        assert_eq!(
            raw("**bold** and *italic*"),
            "<strong>bold</strong> and <em>italic</em>"
        );
        assert_eq!(
            raw("__bold__ and _italic_"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn triple_stars_nest_italic_inside_bold() {
        assert_eq!(raw("***both***"), "<strong><em>both</strong></em>");
    }

    #[test]
    fn emphasis_inside_headers_is_processed() {
        assert_eq!(
            raw("## The **DCF** model"),
            "<h2>The <strong>DCF</strong> model</h2>"
        );
    }

    #[test]
    fn underscores_in_words_become_italic() {
        assert_eq!(raw("snake_case_name"), "<p>snake<em>case</em>name</p>");
    }

    #[test]
    fn fenced_code_block_spans_lines() {
        assert_eq!(
            raw("```\nlet x = 1;\n```"),
            "<pre><code><br />let x = 1;<br /></code></pre>"
        );
    }

    #[test]
    fn inline_code_span() {
        assert_eq!(raw("Use `NPV()` here"), "<p>Use <code>NPV()</code> here</p>");
    }

    #[test]
    fn blockquote_line() {
        assert_eq!(
            raw("> Cash is king"),
            "<blockquote><p>Cash is king</p></blockquote>"
        );
    }

    #[test]
    fn unordered_list_gets_single_container() {
        assert_eq!(
            raw("- a\n- b\n- c"),
            "<ul><li>a</li><li>b</li><li>c</li></ul>"
        );
    }

    #[test]
    fn ordered_list_shares_unordered_container() {
        assert_eq!(raw("1. one\n2. two"), "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn mixed_list_types_collapse_into_one_container() {
        assert_eq!(raw("- a\n1. b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn separated_lists_get_separate_containers() {
        assert_eq!(
            raw("- a\n\nText\n\n- b"),
            "<ul><li>a</li></ul><p>Text</p><p><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn existing_container_is_not_wrapped_again() {
        assert_eq!(raw("<ol>\n- a\n</ol>"), "<ol><br /><li>a</li><br /></ol>");
    }

    #[test]
    fn paragraphs_and_line_breaks() {
        assert_eq!(
            raw("First line\nsecond line\n\nNext paragraph"),
            "<p>First line<br />second line</p><p>Next paragraph</p>"
        );
    }

    #[test]
    fn block_elements_are_unwrapped_from_paragraphs() {
        assert_eq!(
            raw("Intro\n\n## Section\nBody"),
            "<p>Intro</p><p><h2>Section</h2><br />Body</p>"
        );
    }

    #[test]
    fn crlf_is_normalized() {
        assert_eq!(raw("a\r\nb"), raw("a\nb"));
        assert_eq!(raw("a\rb"), raw("a\nb"));
        assert_eq!(raw("a\rb"), "<p>a<br />b</p>");
    }

    #[test]
    fn escaped_mode_neutralizes_raw_html_but_keeps_blockquotes() {
        let html = render_with_options("<b>hi</b>\n> quote", &RenderOptions::escaped()).html;
        assert_eq!(
            html,
            "<p>&lt;b&gt;hi&lt;/b&gt;<br /><blockquote><p>quote</p></blockquote>"
        );
    }

    #[test]
    fn sanitizer_strips_scripts_and_reports_them() {
        let output = render_with_options(
            "Hello\n\n<script>alert(1)</script>",
            &RenderOptions::lesson(),
        );
        assert!(!output.html.contains("script"));
        assert!(output.diagnostics.warnings.contains(&ParseWarning::UnsafeMarkupRemoved {
            description: "<script>".to_string(),
        }));
    }

    #[test]
    fn unclosed_fence_is_reported_with_location() {
        let output = render_with_options("Intro\n\n```\ncode", &RenderOptions::lesson());
        assert_eq!(
            output.diagnostics.warnings,
            vec![ParseWarning::UnclosedCodeFence {
                location: SourceLocation::new(3, 1),
                context: "```".to_string(),
            }]
        );
    }

    #[test]
    fn balanced_fences_report_nothing() {
        let output = render_with_options("```\na\n```\n\n```\nb\n```", &RenderOptions::lesson());
        assert!(!output.diagnostics.has_any());
    }

    #[test]
    fn rendering_is_deterministic() {
        let text = "# T\n\n- a\n- b\n\n**x** `y`";
        assert_eq!(render(text), render(text));
    }
}
