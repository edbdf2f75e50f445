use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use tokio::sync::watch;

use quiz_core::model::{SessionId, SwipeDirection};
use quiz_core::{
    AnswerOutcome, Clock, DragTracker, GestureOutcome, Key, QuizSession, QuizSettings,
    SettleTicket,
};

use crate::deck_builder::DeckBuilder;
use crate::store::ViewStore;
use crate::view::ArenaView;

/// Raw input coming from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArenaEvent {
    PointerDown { x: f64 },
    PointerMove { x: f64 },
    PointerUp,
    /// Treated like a release: a drag past the threshold still answers.
    PointerCancel,
    Key(Key),
    /// The explicit "Faux" / "Vrai" buttons.
    Button(SwipeDirection),
    Reset,
}

/// One player's quiz table: session, drag tracking and snapshot publishing.
///
/// Every state change publishes a fresh `ArenaView`; ignored input publishes
/// nothing.
pub struct QuizArena {
    session: QuizSession,
    drag: DragTracker,
    builder: DeckBuilder,
    rng: StdRng,
    clock: Clock,
    settings: QuizSettings,
    store: ViewStore,
}

impl QuizArena {
    #[must_use]
    pub fn new(settings: QuizSettings, builder: DeckBuilder, mut rng: StdRng, clock: Clock) -> Self {
        let deck = builder.build(&mut rng);
        let session = QuizSession::new(
            SessionId::new_random(),
            deck,
            settings.scoring(),
            settings.history_capacity(),
        );
        let drag = DragTracker::new(settings.drag_threshold_px(), settings.preview_threshold_px());
        let store = ViewStore::new(ArenaView::capture(&session, drag.state(), &settings));

        tracing::info!(
            session_id = %session.id(),
            cards = session.total_cards(),
            "quiz.session_started"
        );

        Self {
            session,
            drag,
            builder,
            rng,
            clock,
            settings,
            store,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn view(&self) -> ArenaView {
        ArenaView::capture(&self.session, self.drag.state(), &self.settings)
    }

    #[must_use]
    pub fn latest(&self) -> Arc<ArenaView> {
        self.store.latest()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<ArenaView>> {
        self.store.subscribe()
    }

    #[must_use]
    pub fn pending_settle(&self) -> Option<SettleTicket> {
        self.session.pending_settle()
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settings.settle_delay()
    }

    /// Dispatches one input event. Returns true when the state changed.
    pub fn handle(&mut self, event: ArenaEvent) -> bool {
        match event {
            ArenaEvent::PointerDown { x } => self.pointer_down(x),
            ArenaEvent::PointerMove { x } => self.pointer_move(x),
            ArenaEvent::PointerUp | ArenaEvent::PointerCancel => {
                !matches!(self.pointer_up(), GestureOutcome::Ignored)
            }
            ArenaEvent::Key(key) => self.key(key).is_accepted(),
            ArenaEvent::Button(direction) => self.submit_answer(direction).is_accepted(),
            ArenaEvent::Reset => {
                self.start_or_reset();
                true
            }
        }
    }

    /// Deals a fresh deck and zeroes every counter. Cancels any pending settle.
    pub fn start_or_reset(&mut self) {
        let deck = self.builder.build(&mut self.rng);
        let cancelled = self.session.pending_settle().is_some();
        self.session.reset(SessionId::new_random(), deck);
        self.drag.reset();

        tracing::info!(
            session_id = %self.session.id(),
            cards = self.session.total_cards(),
            cancelled_settle = cancelled,
            "quiz.session_reset"
        );
        self.publish();
    }

    /// Answers the active card. Silently ignored while locked or complete.
    pub fn submit_answer(&mut self, direction: SwipeDirection) -> AnswerOutcome {
        let outcome = self.session.submit_answer(direction, self.clock.now());
        if let AnswerOutcome::Accepted { snapshot, ticket } = &outcome {
            self.drag.fly_out(direction, self.settings.fly_out_distance_px());
            tracing::debug!(
                session_id = %self.session.id(),
                card_id = %snapshot.card.id,
                direction = ?direction,
                correct = snapshot.was_correct,
                score = self.session.score(),
                streak = self.session.streak(),
                ticket = ticket.value(),
                "quiz.answer_accepted"
            );
            self.publish();
        }
        outcome
    }

    pub fn key(&mut self, key: Key) -> AnswerOutcome {
        match key.direction() {
            Some(direction) => self.submit_answer(direction),
            None => AnswerOutcome::Ignored,
        }
    }

    pub fn pointer_down(&mut self, x: f64) -> bool {
        if !self.session.accepts_input() {
            return false;
        }
        self.drag.pointer_down(x);
        self.publish();
        true
    }

    pub fn pointer_move(&mut self, x: f64) -> bool {
        if !self.session.accepts_input() || !self.drag.is_dragging() {
            return false;
        }
        self.drag.pointer_move(x);
        self.publish();
        true
    }

    /// Releases the drag: answers past the threshold, springs back otherwise.
    pub fn pointer_up(&mut self) -> GestureOutcome {
        if !self.session.accepts_input() {
            return GestureOutcome::Ignored;
        }
        let outcome = self.drag.pointer_up();
        match outcome {
            GestureOutcome::Answer(direction) => {
                let _ = self.submit_answer(direction);
            }
            GestureOutcome::Cancelled => self.publish(),
            GestureOutcome::Ignored => {}
        }
        outcome
    }

    /// Completes the animation for `ticket`. Stale tickets are ignored.
    pub fn settle(&mut self, ticket: SettleTicket) -> bool {
        if !self.session.settle(ticket) {
            return false;
        }
        self.drag.reset();
        if self.session.is_complete() {
            tracing::info!(
                session_id = %self.session.id(),
                score = self.session.score(),
                best_streak = self.session.best_streak(),
                "quiz.session_complete"
            );
        } else {
            tracing::trace!(
                session_id = %self.session.id(),
                remaining = self.session.remaining_cards(),
                "quiz.card_settled"
            );
        }
        self.publish();
        true
    }

    fn publish(&self) {
        self.store.publish(self.view());
    }
}

impl fmt::Debug for QuizArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizArena")
            .field("session", &self.session)
            .field("drag", &self.drag.state())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
