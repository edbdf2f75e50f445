use std::sync::Arc;

use serde::Serialize;

use quiz_core::model::{AnswerSnapshot, CardStatus, DomainCount, QuizCard, SessionId};
use quiz_core::{DragState, QuizSession, QuizSettings, SessionPhase};

/// Everything the presentation layer needs to draw the arena.
///
/// Published as an immutable snapshot after each state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArenaView {
    pub session_id: SessionId,
    pub phase: SessionPhase,
    pub active_card: Option<Arc<QuizCard>>,
    /// Cards stacked behind the active one, nearest first.
    pub upcoming: Vec<Arc<QuizCard>>,
    pub card_status: CardStatus,
    pub drag: DragState,
    pub interactions_locked: bool,
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub on_fire: bool,
    pub total_cards: usize,
    pub answered_cards: usize,
    pub completion_percent: u8,
    pub remaining_by_domain: Vec<DomainCount>,
    /// Most recent answers, newest first.
    pub history: Vec<AnswerSnapshot>,
}

impl ArenaView {
    #[must_use]
    pub fn capture(session: &QuizSession, drag: DragState, settings: &QuizSettings) -> Self {
        let progress = session.progress();
        Self {
            session_id: session.id(),
            phase: session.phase(),
            active_card: session.active_card().cloned(),
            upcoming: session.upcoming(settings.upcoming_cards()).cloned().collect(),
            card_status: session.card_status(),
            drag,
            interactions_locked: session.interactions_locked(),
            score: session.score(),
            streak: session.streak(),
            best_streak: session.best_streak(),
            on_fire: session.streak() >= settings.hot_streak(),
            total_cards: progress.total,
            answered_cards: progress.answered,
            completion_percent: progress.completion_percent(),
            remaining_by_domain: session.remaining_by_domain(),
            history: session.history().to_vec(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    #[must_use]
    pub fn remaining_cards(&self) -> usize {
        self.total_cards.saturating_sub(self.answered_cards)
    }
}
