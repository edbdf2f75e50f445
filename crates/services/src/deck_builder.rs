use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use quiz_core::Catalog;
use quiz_core::model::{Deck, QuizCard};

/// Where deck shuffles draw their randomness from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShuffleSource {
    #[default]
    Entropy,
    /// Reproducible shuffles, for tests and replays.
    Seeded(u64),
}

impl ShuffleSource {
    #[must_use]
    pub fn rng(self) -> StdRng {
        match self {
            ShuffleSource::Entropy => StdRng::from_os_rng(),
            ShuffleSource::Seeded(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

/// Deals play-through decks from a catalog.
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    catalog: Arc<Catalog>,
}

impl DeckBuilder {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns a uniformly shuffled copy of the catalog (Fisher–Yates).
    ///
    /// The catalog itself is left untouched.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Deck {
        let mut cards: Vec<Arc<QuizCard>> = self.catalog.cards().to_vec();
        cards.shuffle(rng);
        Deck::from_cards(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{CardId, Difficulty, KnowledgeDomain};
    use std::collections::HashMap;

    fn small_catalog(n: usize) -> Arc<Catalog> {
        let cards = (0..n)
            .map(|i| QuizCard {
                id: CardId::new(format!("card-{i}")),
                domain: KnowledgeDomain::Economie,
                prompt: format!("prompt {i}"),
                answer_is_true: i % 2 == 0,
                explanation: String::new(),
                spice_line: None,
                difficulty: Difficulty::Facile,
            })
            .collect();
        Arc::new(Catalog::new(cards).unwrap())
    }

    #[test]
    fn deck_is_a_permutation_of_the_catalog() {
        let builder = DeckBuilder::new(Arc::new(Catalog::builtin()));
        let mut rng = ShuffleSource::Seeded(7).rng();

        for _ in 0..20 {
            let mut dealt = builder.build(&mut rng).ids();
            let mut expected: Vec<_> = builder.catalog().cards().iter().map(|c| c.id.clone()).collect();
            dealt.sort();
            expected.sort();
            assert_eq!(dealt, expected);
        }
    }

    #[test]
    fn building_leaves_catalog_order_untouched() {
        let catalog = Arc::new(Catalog::builtin());
        let before: Vec<_> = catalog.cards().iter().map(|c| c.id.clone()).collect();
        let builder = DeckBuilder::new(Arc::clone(&catalog));
        let _ = builder.build(&mut ShuffleSource::Seeded(1).rng());
        let after: Vec<_> = catalog.cards().iter().map(|c| c.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let builder = DeckBuilder::new(Arc::new(Catalog::builtin()));
        let a = builder.build(&mut ShuffleSource::Seeded(42).rng()).ids();
        let b = builder.build(&mut ShuffleSource::Seeded(42).rng()).ids();
        assert_eq!(a, b);
    }

    #[test]
    fn every_ordering_is_roughly_equally_likely() {
        let builder = DeckBuilder::new(small_catalog(3));
        let mut rng = ShuffleSource::Seeded(2024).rng();
        let draws = 6_000;
        let mut counts: HashMap<Vec<CardId>, u32> = HashMap::new();

        for _ in 0..draws {
            *counts.entry(builder.build(&mut rng).ids()).or_default() += 1;
        }

        // 3! orderings, ~1000 each; sd is about 29.
        assert_eq!(counts.len(), 6);
        for (order, count) in &counts {
            assert!(
                (850..=1150).contains(count),
                "ordering {order:?} drawn {count} times"
            );
        }
    }
}
