use std::collections::VecDeque;
use std::sync::Arc;

use crate::model::card::{DomainCount, QuizCard, count_by_domain};
use crate::model::ids::CardId;

/// Cards still to be played in the current play-through, front first.
///
/// A deck only ever shrinks; an empty deck means the session is over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    cards: VecDeque<Arc<QuizCard>>,
}

impl Deck {
    /// Builds a deck in the given order.
    #[must_use]
    pub fn from_cards(cards: Vec<Arc<QuizCard>>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn front(&self) -> Option<&Arc<QuizCard>> {
        self.cards.front()
    }

    /// Up to `count` cards waiting behind the active one.
    pub fn upcoming(&self, count: usize) -> impl Iterator<Item = &Arc<QuizCard>> {
        self.cards.iter().skip(1).take(count)
    }

    pub fn pop_front(&mut self) -> Option<Arc<QuizCard>> {
        self.cards.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<QuizCard>> {
        self.cards.iter()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id.clone()).collect()
    }

    #[must_use]
    pub fn remaining_by_domain(&self) -> Vec<DomainCount> {
        count_by_domain(self.cards.iter().map(|card| &**card))
    }
}
