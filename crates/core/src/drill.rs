//! Extraction of self-test prompts from a lesson's `## Mini Drill` section.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Answer used for prompts recovered by the plain numbered-list fallback.
pub const FALLBACK_ANSWER: &str =
    "Think through your answer, then check with your study materials.";

/// Heading that opens a drill section, compared ASCII case-insensitively.
const SECTION_HEADING: &str = "## mini drill";

/// `1. **Question** ...`: the question is a single line between the bold markers.
static BOLD_PROMPT: Lazy<Regex> = Lazy::new(|| pattern(r"[0-9]+\.\s*\*\*(.*?)\*\*"));
/// Start of the next bold prompt; ends the previous answer.
static BOLD_MARKER: Lazy<Regex> = Lazy::new(|| pattern(r"[0-9]+\.\s*\*\*"));
/// Any `N.` marker, used by the fallback.
static NUMBER_MARKER: Lazy<Regex> = Lazy::new(|| pattern(r"[0-9]+\."));

fn pattern(source: &str) -> Regex {
    Regex::new(source).unwrap_or_else(|err| panic!("invalid drill pattern {source:?}: {err}"))
}

/// One question/answer pair from a drill section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillPrompt {
    /// Question shown to the learner.
    pub question: String,
    /// Answer revealed on request.
    pub answer: String,
}

impl DrillPrompt {
    /// Creates a prompt from a question and its answer.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Returns the drill section of `text`: from the `## Mini Drill` heading line up to the
/// next line starting with `## `, or the end of the text.
pub fn find_drill_section(text: &str) -> Option<&str> {
    let mut start = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        match start {
            None if is_drill_heading(line) => start = Some(offset),
            Some(section_start) if line.starts_with("## ") => {
                return Some(&text[section_start..offset]);
            }
            _ => {}
        }
        offset += line.len();
    }

    start.map(|section_start| &text[section_start..])
}

fn is_drill_heading(line: &str) -> bool {
    line.get(..SECTION_HEADING.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(SECTION_HEADING))
}

/// Extracts drill prompts from a lesson body, in source order.
///
/// Prompts written as `1. **Question** answer` are preferred. When none are found, each
/// numbered line becomes a question paired with [`FALLBACK_ANSWER`]. A lesson without a
/// drill section yields no prompts.
///
/// ```
/// use offerready_core::drill::extract_prompts;
///
/// let prompts = extract_prompts("## Mini Drill\n1. **What is EV?** Equity plus net debt.");
/// assert_eq!(prompts[0].question, "What is EV?");
/// assert_eq!(prompts[0].answer, "Equity plus net debt.");
/// ```
pub fn extract_prompts(text: &str) -> Vec<DrillPrompt> {
    let Some(section) = find_drill_section(text) else {
        return Vec::new();
    };

    let prompts = bold_prompts(section);
    if !prompts.is_empty() {
        return prompts;
    }

    log::debug!("No bold drill prompts found, falling back to numbered lines");
    numbered_prompts(section)
}

fn bold_prompts(section: &str) -> Vec<DrillPrompt> {
    let mut prompts = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = BOLD_PROMPT.captures_at(section, cursor) {
        let (Some(whole), Some(question)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let answer_end = BOLD_MARKER
            .find_at(section, whole.end())
            .map_or(section.len(), |next| next.start());

        let question = question.as_str().trim();
        let answer = strip_bullet(section[whole.end()..answer_end].trim());
        if !question.is_empty() && !answer.is_empty() {
            prompts.push(DrillPrompt::new(question, answer));
        }
        cursor = answer_end;
    }

    prompts
}

fn numbered_prompts(section: &str) -> Vec<DrillPrompt> {
    let mut prompts = Vec::new();
    let mut cursor = 0;

    while let Some(marker) = NUMBER_MARKER.find_at(section, cursor) {
        let text_end = NUMBER_MARKER
            .find_at(section, marker.end())
            .map_or(section.len(), |next| next.start());

        let text = section[marker.end()..text_end].trim();
        if let Some(question) = text.lines().next() {
            prompts.push(DrillPrompt::new(question, FALLBACK_ANSWER));
        }
        cursor = text_end;
    }

    prompts
}

/// Drops one leading `-` or en-dash bullet and the whitespace after it.
fn strip_bullet(answer: &str) -> &str {
    answer
        .strip_prefix('-')
        .or_else(|| answer.strip_prefix('\u{2013}'))
        .map_or(answer, str::trim_start)
}
