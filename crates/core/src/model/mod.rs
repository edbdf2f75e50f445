mod answer;
mod card;
mod deck;
mod ids;

pub use ids::{CardId, ParseIdError, SessionId};

pub use answer::{AnswerHistory, AnswerSnapshot, SwipeDirection};
pub use card::{CardStatus, Difficulty, DomainCount, KnowledgeDomain, QuizCard, count_by_domain};
pub use deck::Deck;
