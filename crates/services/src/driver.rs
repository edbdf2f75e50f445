use std::future;
use std::pin::Pin;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Sleep, sleep};

use quiz_core::SettleTicket;

use crate::arena::{ArenaEvent, QuizArena};

/// Single-task event loop around a `QuizArena`.
///
/// Input events arrive over a channel; the settle step fires from one timer
/// that follows the arena's pending ticket. A new ticket replaces the timer
/// and a reset drops it.
#[derive(Debug)]
pub struct ArenaDriver {
    arena: QuizArena,
    events: mpsc::Receiver<ArenaEvent>,
}

struct PendingSettle {
    ticket: SettleTicket,
    timer: Pin<Box<Sleep>>,
}

enum Wake {
    Event(Option<ArenaEvent>),
    Settle(SettleTicket),
}

impl ArenaDriver {
    #[must_use]
    pub fn new(arena: QuizArena, events: mpsc::Receiver<ArenaEvent>) -> Self {
        Self { arena, events }
    }

    /// Creates a driver together with the sender feeding it.
    #[must_use]
    pub fn channel(arena: QuizArena, buffer: usize) -> (mpsc::Sender<ArenaEvent>, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (tx, Self::new(arena, rx))
    }

    #[must_use]
    pub fn arena(&self) -> &QuizArena {
        &self.arena
    }

    /// Runs until every sender is dropped, then hands the arena back.
    pub async fn run(mut self) -> QuizArena {
        let delay = self.arena.settle_delay();
        let mut pending: Option<PendingSettle> = None;
        tracing::debug!(settle_ms = delay.as_millis() as u64, "quiz.driver_started");

        loop {
            pending = sync_timer(self.arena.pending_settle(), pending.take(), delay);

            let wake = tokio::select! {
                event = self.events.recv() => Wake::Event(event),
                ticket = wait_settle(&mut pending) => Wake::Settle(ticket),
            };

            match wake {
                Wake::Event(Some(event)) => {
                    self.arena.handle(event);
                }
                Wake::Event(None) => break,
                Wake::Settle(ticket) => {
                    pending = None;
                    self.arena.settle(ticket);
                }
            }
        }

        tracing::debug!(session_id = %self.arena.session().id(), "quiz.driver_stopped");
        self.arena
    }
}

fn sync_timer(
    wanted: Option<SettleTicket>,
    current: Option<PendingSettle>,
    delay: Duration,
) -> Option<PendingSettle> {
    match (wanted, current) {
        (Some(ticket), Some(current)) if current.ticket == ticket => Some(current),
        (Some(ticket), _) => Some(PendingSettle {
            ticket,
            timer: Box::pin(sleep(delay)),
        }),
        (None, _) => None,
    }
}

async fn wait_settle(pending: &mut Option<PendingSettle>) -> SettleTicket {
    match pending {
        Some(settle) => {
            settle.timer.as_mut().await;
            settle.ticket
        }
        None => future::pending().await,
    }
}
