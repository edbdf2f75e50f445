#![forbid(unsafe_code)]

pub mod catalog;
pub mod gesture;
pub mod model;
pub mod session;
pub mod settings;
pub mod time;

pub use catalog::{Catalog, CatalogError};
pub use gesture::{DragState, DragTracker, GestureOutcome, Key};
pub use session::{
    AnswerOutcome, QuizSession, ScoringRules, SessionPhase, SessionProgress, SettleTicket,
};
pub use settings::{QuizSettings, SettingsError};
pub use time::Clock;
