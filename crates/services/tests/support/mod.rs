//! Shared helpers for integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

use quiz_core::model::{CardId, Difficulty, KnowledgeDomain, QuizCard};
use quiz_core::time::fixed_clock;
use quiz_core::{Catalog, QuizSettings};
use services::{QuizContext, ShuffleSource};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Test logging, controlled by `TEST_LOG`, then `RUST_LOG`, defaulting to `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn card(id: &str, answer_is_true: bool) -> QuizCard {
    QuizCard {
        id: CardId::new(id),
        domain: KnowledgeDomain::Economie,
        prompt: format!("statement {id}"),
        answer_is_true,
        explanation: format!("explanation {id}"),
        spice_line: None,
        difficulty: Difficulty::Facile,
    }
}

pub fn context_with(cards: Vec<QuizCard>) -> QuizContext {
    init_logging();
    QuizContext::new(
        QuizSettings::default_arcade(),
        Catalog::new(cards).unwrap(),
        fixed_clock(),
        ShuffleSource::Seeded(5),
    )
}
