#![forbid(unsafe_code)]

pub mod arena;
pub mod context;
pub mod deck_builder;
pub mod driver;
pub mod error;
pub mod store;
pub mod view;

pub use quiz_core::Clock;

pub use arena::{ArenaEvent, QuizArena};
pub use context::QuizContext;
pub use deck_builder::{DeckBuilder, ShuffleSource};
pub use driver::ArenaDriver;
pub use error::ContextError;
pub use store::ViewStore;
pub use view::ArenaView;
