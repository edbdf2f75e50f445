use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

use crate::model::card::QuizCard;

//
// ─── DIRECTION ─────────────────────────────────────────────────────────────────
//

/// Side a card is thrown to. Right means "true", left means "false".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    #[must_use]
    pub fn guess_is_true(self) -> bool {
        matches!(self, SwipeDirection::Right)
    }

    /// Direction of a signed horizontal offset; `None` at zero.
    #[must_use]
    pub fn from_offset(offset: f64) -> Option<Self> {
        if offset > 0.0 {
            Some(SwipeDirection::Right)
        } else if offset < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    }

    /// Unit sign used for fly-out offsets.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Immutable record of one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSnapshot {
    pub card: Arc<QuizCard>,
    pub guess_is_true: bool,
    pub was_correct: bool,
    pub direction: SwipeDirection,
    pub timestamp: DateTime<Utc>,
}

impl AnswerSnapshot {
    #[must_use]
    pub fn new(card: Arc<QuizCard>, direction: SwipeDirection, timestamp: DateTime<Utc>) -> Self {
        let guess_is_true = direction.guess_is_true();
        let was_correct = guess_is_true == card.answer_is_true;
        Self {
            card,
            guess_is_true,
            was_correct,
            direction,
            timestamp,
        }
    }
}

//
// ─── HISTORY ───────────────────────────────────────────────────────────────────
//

/// Most recent answers, newest first, bounded to `capacity` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerHistory {
    entries: VecDeque<AnswerSnapshot>,
    capacity: usize,
}

impl AnswerHistory {
    /// A zero capacity is bumped to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, snapshot: AnswerSnapshot) {
        self.entries.push_front(snapshot);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&AnswerSnapshot> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnswerSnapshot> {
        self.entries.iter()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<AnswerSnapshot> {
        self.entries.iter().cloned().collect()
    }
}
