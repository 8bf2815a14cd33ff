//! Cursor state for the Quick Drill flip-card widget.

use offerready_core::{DrillPrompt, extract_prompts};

/// Walks a lesson's drill prompts one at a time, hiding the answer after every move.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrillSession {
    prompts: Vec<DrillPrompt>,
    index: usize,
    revealed: bool,
}

impl DrillSession {
    /// Starts a session over `prompts`.
    pub fn new(prompts: Vec<DrillPrompt>) -> Self {
        Self {
            prompts,
            index: 0,
            revealed: false,
        }
    }

    /// Starts a session over the prompts extracted from a lesson's markdown.
    pub fn from_lesson(markdown: &str) -> Self {
        Self::new(extract_prompts(markdown))
    }

    /// True when the lesson had no drill prompts; the widget is not shown.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Number of prompts.
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// The prompt under the cursor.
    pub fn current(&self) -> Option<&DrillPrompt> {
        self.prompts.get(self.index)
    }

    /// One-based position and total, e.g. `(2, 5)` for "2 of 5".
    pub fn position(&self) -> (usize, usize) {
        if self.prompts.is_empty() {
            (0, 0)
        } else {
            (self.index + 1, self.prompts.len())
        }
    }

    /// Whether the current answer is showing.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Shows the current answer.
    pub fn reveal(&mut self) {
        self.revealed = !self.prompts.is_empty();
    }

    /// Moves to the next prompt, wrapping to the first.
    pub fn next(&mut self) {
        if !self.prompts.is_empty() {
            self.index = (self.index + 1) % self.prompts.len();
        }
        self.revealed = false;
    }

    /// Moves to the previous prompt, wrapping to the last.
    pub fn prev(&mut self) {
        if !self.prompts.is_empty() {
            let len = self.prompts.len();
            self.index = (self.index + len - 1) % len;
        }
        self.revealed = false;
    }

    /// Back to the first prompt with the answer hidden.
    pub fn reset(&mut self) {
        self.index = 0;
        self.revealed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON: &str = "# EV\n\n## Mini Drill\n1. **A?** one\n2. **B?** two\n3. **C?** three";

    #[test]
    fn wraps_in_both_directions() {
        let mut session = DrillSession::from_lesson(LESSON);
        assert_eq!(session.position(), (1, 3));

        session.prev();
        assert_eq!(session.current().map(|p| p.question.as_str()), Some("C?"));
        assert_eq!(session.position(), (3, 3));

        session.next();
        assert_eq!(session.current().map(|p| p.question.as_str()), Some("A?"));
    }

    #[test]
    fn moving_hides_the_answer() {
        let mut session = DrillSession::from_lesson(LESSON);
        session.reveal();
        assert!(session.is_revealed());
        session.next();
        assert!(!session.is_revealed());

        session.reveal();
        session.next();
        session.reset();
        assert!(!session.is_revealed());
        assert_eq!(session.position(), (1, 3));
    }

    #[test]
    fn empty_session_is_inert() {
        let mut session = DrillSession::from_lesson("# No drill here");
        assert!(session.is_empty());
        session.next();
        session.prev();
        session.reveal();
        assert!(!session.is_revealed());
        assert_eq!(session.current(), None);
        assert_eq!(session.position(), (0, 0));
    }
}
