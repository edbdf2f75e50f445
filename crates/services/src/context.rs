use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;

use quiz_core::{Catalog, Clock, QuizSettings};

use crate::arena::{ArenaEvent, QuizArena};
use crate::deck_builder::{DeckBuilder, ShuffleSource};
use crate::driver::ArenaDriver;
use crate::error::ContextError;

/// Process-wide quiz dependencies, built once at startup and passed down.
#[derive(Debug, Clone)]
pub struct QuizContext {
    settings: QuizSettings,
    catalog: Arc<Catalog>,
    clock: Clock,
    shuffle: ShuffleSource,
}

impl QuizContext {
    #[must_use]
    pub fn new(settings: QuizSettings, catalog: Catalog, clock: Clock, shuffle: ShuffleSource) -> Self {
        tracing::debug!(
            cards = catalog.len(),
            settle_ms = settings.settle_delay_ms(),
            seeded = matches!(shuffle, ShuffleSource::Seeded(_)),
            "quiz.context_ready"
        );
        Self {
            settings,
            catalog: Arc::new(catalog),
            clock,
            shuffle,
        }
    }

    /// Context over the built-in question bank.
    #[must_use]
    pub fn builtin(settings: QuizSettings, clock: Clock, shuffle: ShuffleSource) -> Self {
        Self::new(settings, Catalog::builtin(), clock, shuffle)
    }

    /// Context over a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::Catalog` if the file cannot be read or validated.
    pub fn from_catalog_path(
        settings: QuizSettings,
        path: impl AsRef<Path>,
        clock: Clock,
        shuffle: ShuffleSource,
    ) -> Result<Self, ContextError> {
        let catalog = Catalog::from_path(path)?;
        Ok(Self::new(settings, catalog, clock, shuffle))
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn deck_builder(&self) -> DeckBuilder {
        DeckBuilder::new(self.catalog())
    }

    /// Opens a new arena with a freshly shuffled deck.
    #[must_use]
    pub fn arena(&self) -> QuizArena {
        QuizArena::new(
            self.settings.clone(),
            self.deck_builder(),
            self.shuffle.rng(),
            self.clock,
        )
    }

    /// Opens an arena wrapped in a driver, plus the sender that feeds it.
    #[must_use]
    pub fn driver(&self, buffer: usize) -> (mpsc::Sender<ArenaEvent>, ArenaDriver) {
        ArenaDriver::channel(self.arena(), buffer)
    }
}
