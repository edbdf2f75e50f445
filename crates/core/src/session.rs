use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::model::{
    AnswerHistory, AnswerSnapshot, CardStatus, Deck, DomainCount, QuizCard, SessionId,
    SwipeDirection,
};

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Points won per hit and lost per miss. The score never drops below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    hit_points: u32,
    miss_penalty: u32,
}

impl ScoringRules {
    #[must_use]
    pub fn new(hit_points: u32, miss_penalty: u32) -> Self {
        Self {
            hit_points,
            miss_penalty,
        }
    }

    #[must_use]
    pub fn apply(&self, score: u32, was_correct: bool) -> u32 {
        if was_correct {
            score.saturating_add(self.hit_points)
        } else {
            score.saturating_sub(self.miss_penalty)
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::new(2, 1)
    }
}

//
// ─── PHASES & TICKETS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// A card is active and input is accepted.
    Playing,
    /// An answer was registered; waiting for the card to settle.
    Animating,
    /// The deck is exhausted.
    Complete,
}

/// Handle for the single pending settle step.
///
/// Ticket numbers are never reused within a session, so a ticket issued
/// before a reset can never settle a later card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettleTicket(u64);

impl SettleTicket {
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Result of `QuizSession::submit_answer`.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum AnswerOutcome {
    /// Input arrived while locked or after completion. Nothing changed.
    Ignored,
    Accepted {
        snapshot: AnswerSnapshot,
        ticket: SettleTicket,
    },
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, AnswerOutcome::Accepted { .. })
    }

    #[must_use]
    pub fn ticket(&self) -> Option<SettleTicket> {
        match self {
            AnswerOutcome::Accepted { ticket, .. } => Some(*ticket),
            AnswerOutcome::Ignored => None,
        }
    }
}

/// Aggregated view of session progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Rounded percentage of answered cards; 0 for an empty session.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let answered = self.answered.min(self.total) as u64;
        let total = self.total as u64;
        let percent = (answered * 200 + total) / (total * 2);
        u8::try_from(percent).unwrap_or(100)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Swipe quiz play-through.
///
/// Answering locks the session and issues a `SettleTicket`; the card only
/// leaves the deck once the caller settles that ticket (after the settle
/// delay). Inputs received while locked or complete are silently ignored.
pub struct QuizSession {
    id: SessionId,
    deck: Deck,
    total: usize,
    score: u32,
    streak: u32,
    best_streak: u32,
    history: AnswerHistory,
    status: CardStatus,
    pending: Option<SettleTicket>,
    next_ticket: u64,
    rules: ScoringRules,
}

impl QuizSession {
    #[must_use]
    pub fn new(id: SessionId, deck: Deck, rules: ScoringRules, history_capacity: usize) -> Self {
        Self {
            id,
            total: deck.len(),
            deck,
            score: 0,
            streak: 0,
            best_streak: 0,
            history: AnswerHistory::with_capacity(history_capacity),
            status: CardStatus::Pending,
            pending: None,
            next_ticket: 0,
            rules,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.pending.is_some() {
            SessionPhase::Animating
        } else if self.deck.is_empty() {
            SessionPhase::Complete
        } else {
            SessionPhase::Playing
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase() == SessionPhase::Complete
    }

    #[must_use]
    pub fn interactions_locked(&self) -> bool {
        self.pending.is_some()
    }

    /// True when a new answer would be accepted.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.phase() == SessionPhase::Playing
    }

    #[must_use]
    pub fn pending_settle(&self) -> Option<SettleTicket> {
        self.pending
    }

    #[must_use]
    pub fn active_card(&self) -> Option<&Arc<QuizCard>> {
        self.deck.front()
    }

    pub fn upcoming(&self, count: usize) -> impl Iterator<Item = &Arc<QuizCard>> {
        self.deck.upcoming(count)
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    #[must_use]
    pub fn card_status(&self) -> CardStatus {
        self.status
    }

    #[must_use]
    pub fn history(&self) -> &AnswerHistory {
        &self.history
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.total
    }

    /// Cards that have left the deck. The card being animated is not counted yet.
    #[must_use]
    pub fn answered_cards(&self) -> usize {
        self.total.saturating_sub(self.deck.len())
    }

    #[must_use]
    pub fn remaining_cards(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn remaining_by_domain(&self) -> Vec<DomainCount> {
        self.deck.remaining_by_domain()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total_cards(),
            answered: self.answered_cards(),
            remaining: self.remaining_cards(),
            is_complete: self.is_complete(),
        }
    }

    /// Register an answer for the active card and lock the session.
    ///
    /// Returns `AnswerOutcome::Ignored` while locked or once the deck is empty.
    pub fn submit_answer(
        &mut self,
        direction: SwipeDirection,
        answered_at: DateTime<Utc>,
    ) -> AnswerOutcome {
        if !self.accepts_input() {
            return AnswerOutcome::Ignored;
        }
        let Some(card) = self.deck.front().cloned() else {
            return AnswerOutcome::Ignored;
        };

        let snapshot = AnswerSnapshot::new(card, direction, answered_at);
        let was_correct = snapshot.was_correct;

        self.score = self.rules.apply(self.score, was_correct);
        self.streak = if was_correct { self.streak + 1 } else { 0 };
        self.best_streak = self.best_streak.max(self.streak);
        self.status = CardStatus::from_correctness(was_correct);
        self.history.record(snapshot.clone());

        let ticket = SettleTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);

        AnswerOutcome::Accepted { snapshot, ticket }
    }

    /// Finish the animation started by `ticket`: drop the answered card and unlock.
    ///
    /// Returns false (and changes nothing) when `ticket` is not the pending one,
    /// e.g. after a reset.
    pub fn settle(&mut self, ticket: SettleTicket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.deck.pop_front();
        self.status = CardStatus::Pending;
        true
    }

    /// Start over with a fresh deck. Any pending settle is cancelled.
    pub fn reset(&mut self, id: SessionId, deck: Deck) {
        self.id = id;
        self.total = deck.len();
        self.deck = deck;
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.history.clear();
        self.status = CardStatus::Pending;
        self.pending = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("phase", &self.phase())
            .field("deck_len", &self.deck.len())
            .field("total", &self.total)
            .field("score", &self.score)
            .field("streak", &self.streak)
            .field("best_streak", &self.best_streak)
            .field("history_len", &self.history.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CardId, Difficulty, KnowledgeDomain};
    use crate::time::fixed_now;
    use proptest::prelude::*;

    fn card(id: &str, answer_is_true: bool) -> Arc<QuizCard> {
        Arc::new(QuizCard {
            id: CardId::new(id),
            domain: if id.starts_with("law") {
                KnowledgeDomain::DroitFrancais
            } else {
                KnowledgeDomain::Economie
            },
            prompt: format!("prompt {id}"),
            answer_is_true,
            explanation: String::new(),
            spice_line: None,
            difficulty: Difficulty::Moyen,
        })
    }

    fn session_with(cards: Vec<Arc<QuizCard>>) -> QuizSession {
        QuizSession::new(
            SessionId::new_random(),
            Deck::from_cards(cards),
            ScoringRules::default(),
            5,
        )
    }

    fn answer_and_settle(session: &mut QuizSession, direction: SwipeDirection) -> bool {
        match session.submit_answer(direction, fixed_now()) {
            AnswerOutcome::Accepted { snapshot, ticket } => {
                assert!(session.settle(ticket));
                snapshot.was_correct
            }
            AnswerOutcome::Ignored => panic!("answer unexpectedly ignored"),
        }
    }

    #[test]
    fn single_card_correct_answer_completes() {
        let mut session = session_with(vec![card("econ-a", true)]);
        assert_eq!(session.phase(), SessionPhase::Playing);

        let outcome = session.submit_answer(SwipeDirection::Right, fixed_now());
        assert!(outcome.is_accepted());
        assert_eq!(session.phase(), SessionPhase::Animating);
        assert_eq!(session.card_status(), CardStatus::Correct);
        assert_eq!(session.score(), 2);
        assert_eq!(session.streak(), 1);
        assert_eq!(session.best_streak(), 1);

        assert!(session.settle(outcome.ticket().unwrap()));
        assert!(session.deck().is_empty());
        assert_eq!(session.phase(), SessionPhase::Complete);
        assert_eq!(session.card_status(), CardStatus::Pending);
        assert!(!session.interactions_locked());
    }

    #[test]
    fn miss_floors_score_then_hit_scores() {
        let mut session = session_with(vec![card("econ-a", true), card("econ-b", true)]);

        assert!(!answer_and_settle(&mut session, SwipeDirection::Left));
        assert_eq!(session.score(), 0);
        assert_eq!(session.streak(), 0);

        assert!(answer_and_settle(&mut session, SwipeDirection::Right));
        assert_eq!(session.score(), 2);
        assert_eq!(session.streak(), 1);
        assert!(session.is_complete());
    }

    #[test]
    fn miss_subtracts_from_positive_score() {
        let mut session = session_with(vec![card("econ-a", true), card("econ-b", false)]);
        answer_and_settle(&mut session, SwipeDirection::Right);
        answer_and_settle(&mut session, SwipeDirection::Right);
        assert_eq!(session.score(), 1);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.best_streak(), 1);
    }

    #[test]
    fn double_submit_is_ignored_while_animating() {
        let mut session = session_with(vec![card("econ-a", true), card("econ-b", true)]);

        let first = session.submit_answer(SwipeDirection::Right, fixed_now());
        let second = session.submit_answer(SwipeDirection::Right, fixed_now());

        assert!(first.is_accepted());
        assert_eq!(second, AnswerOutcome::Ignored);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn answers_after_completion_are_ignored() {
        let mut session = session_with(vec![card("econ-a", true)]);
        answer_and_settle(&mut session, SwipeDirection::Right);
        assert_eq!(
            session.submit_answer(SwipeDirection::Left, fixed_now()),
            AnswerOutcome::Ignored
        );
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn reset_mid_animation_cancels_pending_settle() {
        let mut session = session_with(vec![card("econ-a", true), card("econ-b", true)]);
        let stale = session
            .submit_answer(SwipeDirection::Right, fixed_now())
            .ticket()
            .unwrap();

        let next_id = SessionId::new_random();
        session.reset(
            next_id,
            Deck::from_cards(vec![card("law-a", true), card("law-b", false), card("law-c", true)]),
        );

        assert_eq!(session.id(), next_id);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.pending_settle(), None);
        assert_eq!(session.score(), 0);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.best_streak(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.total_cards(), 3);

        assert!(!session.settle(stale));
        assert_eq!(session.remaining_cards(), 3);
    }

    #[test]
    fn stale_ticket_never_matches_new_answer() {
        let mut session = session_with(vec![card("econ-a", true), card("econ-b", true)]);
        let stale = session
            .submit_answer(SwipeDirection::Right, fixed_now())
            .ticket()
            .unwrap();
        session.reset(
            SessionId::new_random(),
            Deck::from_cards(vec![card("econ-c", true), card("econ-d", true)]),
        );
        let fresh = session
            .submit_answer(SwipeDirection::Right, fixed_now())
            .ticket()
            .unwrap();

        assert_ne!(stale, fresh);
        assert!(!session.settle(stale));
        assert!(session.settle(fresh));
    }

    #[test]
    fn answered_count_moves_on_settle() {
        let mut session = session_with(vec![card("econ-a", true), card("law-b", true)]);
        let ticket = session
            .submit_answer(SwipeDirection::Right, fixed_now())
            .ticket()
            .unwrap();
        assert_eq!(session.answered_cards(), 0);
        session.settle(ticket);
        assert_eq!(session.answered_cards(), 1);
        assert_eq!(session.progress().completion_percent(), 50);
    }

    #[test]
    fn completion_percent_rounds() {
        let progress = SessionProgress {
            total: 12,
            answered: 1,
            remaining: 11,
            is_complete: false,
        };
        assert_eq!(progress.completion_percent(), 8);

        let empty = SessionProgress {
            total: 0,
            answered: 0,
            remaining: 0,
            is_complete: true,
        };
        assert_eq!(empty.completion_percent(), 0);
    }

    #[test]
    fn empty_deck_starts_complete() {
        let session = session_with(Vec::new());
        assert!(session.is_complete());
        assert!(!session.accepts_input());
    }

    #[derive(Debug, Clone)]
    enum Step {
        Answer(SwipeDirection),
        Settle,
        Reset(usize),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            4 => any::<bool>().prop_map(|right| Step::Answer(if right {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            })),
            4 => Just(Step::Settle),
            1 => (0_usize..6).prop_map(Step::Reset),
        ]
    }

    fn deck_of(len: usize, truth: &[bool]) -> Deck {
        Deck::from_cards(
            (0..len)
                .map(|i| card(&format!("econ-{i}"), truth[i % truth.len()]))
                .collect(),
        )
    }

    proptest! {
        #[test]
        fn prop_session_invariants_hold(
            truth in prop::collection::vec(any::<bool>(), 1..8),
            len in 0_usize..10,
            steps in prop::collection::vec(step(), 0..60),
        ) {
            let mut session = QuizSession::new(
                SessionId::new_random(),
                deck_of(len, &truth),
                ScoringRules::default(),
                5,
            );
            let mut previous_best = 0;
            let mut pending = None;

            for step in steps {
                match step {
                    Step::Answer(direction) => {
                        let was_locked = session.interactions_locked();
                        let before = session.history().len();
                        let outcome = session.submit_answer(direction, fixed_now());
                        if was_locked {
                            prop_assert_eq!(&outcome, &AnswerOutcome::Ignored);
                            prop_assert_eq!(session.history().len(), before);
                        }
                        if let Some(ticket) = outcome.ticket() {
                            pending = Some(ticket);
                        }
                    }
                    Step::Settle => {
                        if let Some(ticket) = pending.take() {
                            session.settle(ticket);
                        }
                    }
                    Step::Reset(len) => {
                        session.reset(SessionId::new_random(), deck_of(len, &truth));
                        previous_best = 0;
                    }
                }

                prop_assert_eq!(
                    session.answered_cards() + session.remaining_cards(),
                    session.total_cards()
                );
                prop_assert!(session.best_streak() >= session.streak());
                prop_assert!(session.best_streak() >= previous_best);
                prop_assert!(session.history().len() <= 5);
                previous_best = session.best_streak();
            }
        }
    }
}
