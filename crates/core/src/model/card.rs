use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::CardId;

//
// ─── DOMAINS ───────────────────────────────────────────────────────────────────
//

/// Subject area a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KnowledgeDomain {
    #[serde(rename = "Économie")]
    Economie,
    #[serde(rename = "Droit français")]
    DroitFrancais,
}

impl KnowledgeDomain {
    /// Every domain, in the order the HUD lists them.
    pub const ALL: [KnowledgeDomain; 2] = [KnowledgeDomain::Economie, KnowledgeDomain::DroitFrancais];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            KnowledgeDomain::Economie => "Économie",
            KnowledgeDomain::DroitFrancais => "Droit français",
        }
    }

    /// Short badge label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            KnowledgeDomain::Economie => "Éco",
            KnowledgeDomain::DroitFrancais => "Droit",
        }
    }
}

impl fmt::Display for KnowledgeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Facile,
    Moyen,
    Costaud,
}

impl Difficulty {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Facile => "facile",
            Difficulty::Moyen => "moyen",
            Difficulty::Costaud => "costaud",
        }
    }

    /// Player-facing flavor label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Facile => "Ça passe crème",
            Difficulty::Moyen => "Faut cogiter",
            Difficulty::Costaud => "Niveau boss",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// A true/false statement with its explanation.
///
/// Cards are created once when the catalog loads and never mutated; decks and
/// history share them behind `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCard {
    pub id: CardId,
    pub domain: KnowledgeDomain,
    pub prompt: String,
    pub answer_is_true: bool,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spice_line: Option<String>,
    pub difficulty: Difficulty,
}

/// Visual status of the active card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    #[default]
    Pending,
    Correct,
    Incorrect,
}

impl CardStatus {
    #[must_use]
    pub fn from_correctness(was_correct: bool) -> Self {
        if was_correct {
            CardStatus::Correct
        } else {
            CardStatus::Incorrect
        }
    }
}

//
// ─── DOMAIN COUNTS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCount {
    pub domain: KnowledgeDomain,
    pub remaining: usize,
}

/// Counts cards per domain. Every domain is listed, including empty ones.
pub fn count_by_domain<'a, I>(cards: I) -> Vec<DomainCount>
where
    I: IntoIterator<Item = &'a QuizCard>,
{
    let mut counts = KnowledgeDomain::ALL.map(|domain| DomainCount {
        domain,
        remaining: 0,
    });
    for card in cards {
        if let Some(slot) = counts.iter_mut().find(|c| c.domain == card.domain) {
            slot.remaining += 1;
        }
    }
    counts.to_vec()
}
