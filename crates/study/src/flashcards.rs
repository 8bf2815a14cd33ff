//! Flashcard confidence, mastery and the review queue.

use crate::StudyError;
use crate::progress::{Progress, completion_percentage};
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Self-reported recall confidence for one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Confidence {
    /// 1: forgot it.
    Again = 1,
    /// 2: recalled with effort.
    Hard = 2,
    /// 3: recalled.
    Good = 3,
    /// 4: recalled easily.
    Easy = 4,
    /// 5: instant recall.
    Perfect = 5,
}

impl Confidence {
    /// Lowest rating that counts as mastered.
    pub const MASTERY_THRESHOLD: Confidence = Confidence::Easy;

    /// Label shown next to the rating.
    pub fn label(self) -> &'static str {
        match self {
            Confidence::Again => "Again",
            Confidence::Hard => "Hard",
            Confidence::Good => "Good",
            Confidence::Easy => "Easy",
            Confidence::Perfect => "Perfect",
        }
    }

    /// Whether this rating counts as mastered.
    pub fn is_mastered(self) -> bool {
        self >= Self::MASTERY_THRESHOLD
    }
}

impl TryFrom<u8> for Confidence {
    type Error = StudyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Confidence::Again),
            2 => Ok(Confidence::Hard),
            3 => Ok(Confidence::Good),
            4 => Ok(Confidence::Easy),
            5 => Ok(Confidence::Perfect),
            other => Err(StudyError::InvalidConfidence(other)),
        }
    }
}

impl From<Confidence> for u8 {
    fn from(value: Confidence) -> Self {
        value as u8
    }
}

/// Card difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Must-know material.
    Core,
    /// Frequently asked.
    Common,
    /// Stretch material.
    Advanced,
}

/// A user's review history for one card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardProgress {
    /// Latest confidence rating, if the card was ever rated.
    pub confidence: Option<Confidence>,
    /// When the card was last reviewed.
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// When the card should next be reviewed.
    pub next_review_at: Option<DateTime<Utc>>,
    /// Times the card was shown.
    #[serde(default)]
    pub times_seen: u32,
    /// Times the card was answered correctly.
    #[serde(default)]
    pub times_correct: u32,
}

impl FlashcardProgress {
    /// Whether the latest rating counts as mastered.
    pub fn is_mastered(&self) -> bool {
        self.confidence.is_some_and(Confidence::is_mastered)
    }
}

/// A card together with the user's progress on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Card id.
    pub id: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Review history; `None` for cards never studied.
    pub progress: Option<FlashcardProgress>,
}

impl Flashcard {
    /// A card is due when it was never studied, has no scheduled review, or its review
    /// time has arrived.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match &self.progress {
            None => true,
            Some(progress) => progress.next_review_at.is_none_or(|at| at <= now),
        }
    }

    /// Whether the card has been rated at or above the mastery threshold.
    pub fn is_mastered(&self) -> bool {
        self.progress.as_ref().is_some_and(FlashcardProgress::is_mastered)
    }
}

/// Cards due for review at `now`, in deck order.
pub fn due_cards(cards: &[Flashcard], now: DateTime<Utc>) -> Vec<&Flashcard> {
    cards.iter().filter(|card| card.is_due(now)).collect()
}

/// Summary numbers for a deck page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeckStats {
    /// Cards in the deck.
    pub total: usize,
    /// Cards with any progress.
    pub studied: usize,
    /// Cards rated at or above the mastery threshold.
    pub mastered: usize,
    /// `mastered` as a rounded percentage of `total`.
    pub mastery_percentage: u32,
    /// Cards due at the time of computation.
    pub due: usize,
}

impl DeckStats {
    /// Computes deck statistics at `now`.
    pub fn compute(cards: &[Flashcard], now: DateTime<Utc>) -> Self {
        let total = cards.len();
        let studied = cards.iter().filter(|card| card.progress.is_some()).count();
        let mastered = cards.iter().filter(|card| card.is_mastered()).count();
        let due = cards.iter().filter(|card| card.is_due(now)).count();

        Self {
            total,
            studied,
            mastered,
            mastery_percentage: completion_percentage(mastered, total),
            due,
        }
    }
}

/// Mastery per difficulty tier; tiers without cards are absent.
pub fn mastery_by_difficulty(cards: &[Flashcard]) -> BTreeMap<Difficulty, Progress> {
    let mut counts: BTreeMap<Difficulty, (usize, usize)> = BTreeMap::new();
    for card in cards {
        let entry = counts.entry(card.difficulty).or_default();
        entry.0 += usize::from(card.is_mastered());
        entry.1 += 1;
    }
    counts
        .into_iter()
        .map(|(difficulty, (mastered, total))| (difficulty, Progress::new(mastered, total)))
        .collect()
}

/// Monday 00:00:00.000 through Sunday 23:59:59.999 (UTC) of the week containing `now`.
pub fn week_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let days_since_monday = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(days_since_monday);
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(7) - Duration::milliseconds(1);
    (start, end)
}

/// Number of progress records last reviewed within `[start, end]`.
pub fn studied_between(
    progress: &[FlashcardProgress],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> usize {
    progress
        .iter()
        .filter_map(|p| p.last_reviewed_at)
        .filter(|at| *at >= start && *at <= end)
        .count()
}

/// Dashboard mastery figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MasterySummary {
    /// Cards across all decks.
    pub total_cards: usize,
    /// Progress records at or above the mastery threshold.
    pub mastered_cards: usize,
    /// Progress records reviewed during the current week.
    pub studied_this_week: usize,
}

impl MasterySummary {
    /// Summarizes a user's progress records against the total card count.
    pub fn compute(total_cards: usize, progress: &[FlashcardProgress], now: DateTime<Utc>) -> Self {
        if total_cards == 0 {
            return Self::default();
        }
        let (start, end) = week_bounds(now);
        Self {
            total_cards,
            mastered_cards: progress.iter().filter(|p| p.is_mastered()).count(),
            studied_this_week: studied_between(progress, start, end),
        }
    }
}
