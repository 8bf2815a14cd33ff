//! Mock interview scoring, timers and question rotation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Opening question when a category has no question bank.
pub const DEFAULT_OPENING_QUESTION: &str = "Tell me about yourself.";
/// Follow-up question when a category has no question bank.
pub const DEFAULT_FOLLOW_UP_QUESTION: &str = "Tell me about a challenging situation you faced.";

/// Per-dimension scores for one answer, each out of 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Logical flow of the answer.
    pub structure: u8,
    /// How easy the answer was to follow.
    pub clarity: u8,
    /// Use of concrete examples and numbers.
    pub specificity: u8,
    /// Delivery.
    pub confidence: u8,
    /// Economy of words.
    pub conciseness: u8,
}

impl ScoreBreakdown {
    /// Dimension labels and scores in display order.
    pub fn dimensions(&self) -> [(&'static str, u8); 5] {
        [
            ("Structure", self.structure),
            ("Clarity", self.clarity),
            ("Specificity", self.specificity),
            ("Confidence", self.confidence),
            ("Conciseness", self.conciseness),
        ]
    }

    /// Overall score out of 100: the dimension mean scaled by ten.
    pub fn overall(&self) -> u32 {
        let sum: u32 = self
            .dimensions()
            .iter()
            .map(|(_, score)| u32::from(*score))
            .sum();
        // sum / 5 * 10 is always a whole number
        sum * 2
    }
}

/// Colour band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    /// Green.
    Strong,
    /// Yellow.
    Fair,
    /// Red.
    Weak,
}

impl ScoreTier {
    /// Band for an overall score out of 100: 80 and up is strong, 60 and up is fair.
    pub fn for_overall(score: u32) -> Self {
        match score {
            80.. => ScoreTier::Strong,
            60.. => ScoreTier::Fair,
            _ => ScoreTier::Weak,
        }
    }

    /// Band for a single dimension out of 10: 8 and up is strong, 6 and up is fair.
    pub fn for_dimension(score: u8) -> Self {
        match score {
            8.. => ScoreTier::Strong,
            6.. => ScoreTier::Fair,
            _ => ScoreTier::Weak,
        }
    }
}

/// A recorded answer. `score_overall` is `None` until the answer is scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewAnswer {
    /// Question this answers.
    pub question_id: String,
    /// Overall score out of 100.
    pub score_overall: Option<u32>,
    /// Dimension scores.
    #[serde(default)]
    pub score_breakdown: Option<ScoreBreakdown>,
}

/// Mean overall score of the scored answers, rounded half up. `None` when nothing is scored.
pub fn average_score(answers: &[InterviewAnswer]) -> Option<u32> {
    let scores: Vec<u64> = answers
        .iter()
        .filter_map(|answer| answer.score_overall)
        .map(u64::from)
        .collect();
    if scores.is_empty() {
        return None;
    }
    let count = scores.len() as u64;
    let sum: u64 = scores.iter().sum();
    Some(((sum * 2 + count) / (count * 2)) as u32)
}

/// Session summary figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Questions asked.
    pub total_questions: usize,
    /// Answers that received a score.
    pub scored_answers: usize,
    /// See [`average_score`].
    pub average_score: Option<u32>,
}

impl SessionSummary {
    /// Summarizes a finished session.
    pub fn compute(total_questions: usize, answers: &[InterviewAnswer]) -> Self {
        Self {
            total_questions,
            scored_answers: answers.iter().filter(|a| a.score_overall.is_some()).count(),
            average_score: average_score(answers),
        }
    }
}

/// Formats remaining seconds as zero-padded `mm:ss`.
///
/// ```
/// use offerready_study::interview::format_countdown;
///
/// assert_eq!(format_countdown(125), "02:05");
/// assert_eq!(format_countdown(0), "00:00");
/// ```
pub fn format_countdown(seconds_left: u32) -> String {
    format!("{:02}:{:02}", seconds_left / 60, seconds_left % 60)
}

/// How close the session clock is to running out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownUrgency {
    /// A minute or more left.
    Normal,
    /// Under a minute.
    Low,
    /// Under thirty seconds.
    Critical,
}

impl CountdownUrgency {
    /// Classifies the remaining seconds of a session clock.
    pub fn classify(seconds_left: u32) -> Self {
        match seconds_left {
            0..30 => CountdownUrgency::Critical,
            30..60 => CountdownUrgency::Low,
            _ => CountdownUrgency::Normal,
        }
    }
}

/// Picks the opening question from a category bank. `pick` is any caller-supplied number,
/// typically random, reduced modulo the bank size.
pub fn opening_question(bank: &[String], pick: usize) -> &str {
    choose(bank.iter().map(String::as_str), pick).unwrap_or(DEFAULT_OPENING_QUESTION)
}

/// Picks the next question, preferring ones not yet asked. When every bank question has
/// been asked it repeats from the whole bank.
pub fn next_question<'a>(bank: &'a [String], asked: &[String], pick: usize) -> &'a str {
    let asked: HashSet<&str> = asked.iter().map(String::as_str).collect();
    let unasked = bank
        .iter()
        .map(String::as_str)
        .filter(|question| !asked.contains(question));
    choose(unasked, pick)
        .or_else(|| choose(bank.iter().map(String::as_str), pick))
        .unwrap_or(DEFAULT_FOLLOW_UP_QUESTION)
}

fn choose<'a>(candidates: impl Iterator<Item = &'a str>, pick: usize) -> Option<&'a str> {
    let candidates: Vec<&str> = candidates.collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[pick % candidates.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(score: Option<u32>) -> InterviewAnswer {
        InterviewAnswer {
            question_id: "q".to_string(),
            score_overall: score,
            score_breakdown: None,
        }
    }

    fn bank() -> Vec<String> {
        ["Walk me through a DCF.", "What is WACC?", "Why use EBITDA?"]
            .iter()
            .map(|q| q.to_string())
            .collect()
    }

    #[test]
    fn overall_is_mean_times_ten() {
        let breakdown = ScoreBreakdown {
            structure: 7,
            clarity: 8,
            specificity: 5,
            confidence: 9,
            conciseness: 8,
        };
        assert_eq!(breakdown.overall(), 74);
        assert_eq!(ScoreBreakdown::default().overall(), 0);
        assert_eq!(breakdown.dimensions()[2], ("Specificity", 5));
    }

    #[test]
    fn tiers() {
        assert_eq!(ScoreTier::for_overall(80), ScoreTier::Strong);
        assert_eq!(ScoreTier::for_overall(79), ScoreTier::Fair);
        assert_eq!(ScoreTier::for_overall(60), ScoreTier::Fair);
        assert_eq!(ScoreTier::for_overall(59), ScoreTier::Weak);
        assert_eq!(ScoreTier::for_dimension(8), ScoreTier::Strong);
        assert_eq!(ScoreTier::for_dimension(6), ScoreTier::Fair);
        assert_eq!(ScoreTier::for_dimension(5), ScoreTier::Weak);
    }

    #[test]
    fn average_skips_unscored_and_rounds_half_up() {
        assert_eq!(average_score(&[]), None);
        assert_eq!(average_score(&[answer(None)]), None);
        assert_eq!(average_score(&[answer(Some(70)), answer(None), answer(Some(75))]), Some(73));
        assert_eq!(average_score(&[answer(Some(70)), answer(Some(71)), answer(Some(71))]), Some(71));

        let summary = SessionSummary::compute(3, &[answer(Some(80)), answer(None)]);
        assert_eq!(summary.scored_answers, 1);
        assert_eq!(summary.average_score, Some(80));
    }

    #[test]
    fn countdown() {
        assert_eq!(format_countdown(30 * 60), "30:00");
        assert_eq!(format_countdown(59), "00:59");
        assert_eq!(CountdownUrgency::classify(60), CountdownUrgency::Normal);
        assert_eq!(CountdownUrgency::classify(59), CountdownUrgency::Low);
        assert_eq!(CountdownUrgency::classify(29), CountdownUrgency::Critical);
        assert_eq!(CountdownUrgency::classify(0), CountdownUrgency::Critical);
    }

    #[test]
    fn next_question_avoids_repeats() {
        let bank = bank();
        let asked = vec![bank[0].clone(), bank[2].clone()];
        for pick in 0..5 {
            assert_eq!(next_question(&bank, &asked, pick), "What is WACC?");
        }
    }

    #[test]
    fn exhausted_bank_repeats_and_empty_bank_uses_default() {
        let bank = bank();
        assert_eq!(next_question(&bank, &bank, 4), "What is WACC?");
        assert_eq!(next_question(&[], &[], 0), DEFAULT_FOLLOW_UP_QUESTION);
        assert_eq!(opening_question(&[], 3), DEFAULT_OPENING_QUESTION);
        assert_eq!(opening_question(&bank, 2), "Why use EBITDA?");
    }
}
