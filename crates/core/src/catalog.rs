//! Question bank the decks are dealt from.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{CardId, Difficulty, DomainCount, KnowledgeDomain, QuizCard, count_by_domain};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one card")]
    Empty,

    #[error("duplicate card id: {0}")]
    DuplicateId(CardId),

    #[error("card id cannot be blank")]
    BlankId,

    #[error("card {0} has an empty prompt")]
    EmptyPrompt(CardId),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Validated, immutable list of quiz cards. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    cards: Vec<Arc<QuizCard>>,
}

impl Catalog {
    /// Validates and wraps a list of cards.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for an empty list, `CatalogError::DuplicateId`
    /// when two cards share an id, and `BlankId`/`EmptyPrompt` for blank fields.
    pub fn new(cards: Vec<QuizCard>) -> Result<Self, CatalogError> {
        if cards.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if card.id.is_blank() {
                return Err(CatalogError::BlankId);
            }
            if card.prompt.trim().is_empty() {
                return Err(CatalogError::EmptyPrompt(card.id.clone()));
            }
            if !seen.insert(card.id.clone()) {
                return Err(CatalogError::DuplicateId(card.id.clone()));
            }
        }

        Ok(Self {
            cards: cards.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parses a JSON array of cards (`answerIsTrue`, `spiceLine`, ... field names).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` on malformed input, or any validation error from `new`.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let cards: Vec<QuizCard> = serde_json::from_str(raw)?;
        Self::new(cards)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise as `from_json_str`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The built-in economics and French law question bank.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            cards: builtin_cards().into_iter().map(Arc::new).collect(),
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Arc<QuizCard>] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Arc<QuizCard>> {
        self.cards.iter().find(|card| &card.id == id)
    }

    #[must_use]
    pub fn count_by_domain(&self) -> Vec<DomainCount> {
        count_by_domain(self.cards.iter().map(|card| &**card))
    }
}

//
// ─── BUILT-IN CARDS ────────────────────────────────────────────────────────────
//

fn card(
    id: &str,
    domain: KnowledgeDomain,
    prompt: &str,
    answer_is_true: bool,
    explanation: &str,
    spice_line: &str,
    difficulty: Difficulty,
) -> QuizCard {
    QuizCard {
        id: CardId::new(id),
        domain,
        prompt: prompt.to_string(),
        answer_is_true,
        explanation: explanation.to_string(),
        spice_line: Some(spice_line.to_string()),
        difficulty,
    }
}

#[allow(clippy::too_many_lines)]
fn builtin_cards() -> Vec<QuizCard> {
    use Difficulty::{Costaud, Facile, Moyen};
    use KnowledgeDomain::{DroitFrancais, Economie};

    vec![
        card(
            "econ-bce-inflation-target",
            Economie,
            "La Banque centrale européenne vise une inflation « proche mais inférieure à 2 % » à moyen terme.",
            true,
            "Depuis 2003, la BCE vise un taux d'inflation de 2 % approximativement, objectif réaffirmé en 2021 pour assurer la stabilité des prix.",
            "Lagarde ne fait pas tourner la planche à billets au hasard.",
            Facile,
        ),
        card(
            "econ-gdp-real",
            Economie,
            "Le PIB nominal d’un pays est déjà corrigé de l’inflation, contrairement au PIB réel.",
            false,
            "C’est l’inverse : le PIB réel est ajusté de l’inflation, le PIB nominal reste au prix courant. Gare aux cousins économistes qui confondent.",
            "Le nominal aime bien les chiffres gonflés.",
            Moyen,
        ),
        card(
            "econ-fiscal-multiplicateur",
            Economie,
            "Un multiplicateur budgétaire supérieur à 1 signifie qu’un euro de dépense publique génère plus d’un euro de PIB.",
            true,
            "Le multiplicateur budgétaire mesure l’effet d’une dépense publique sur l’activité. S'il est > 1, l’effet amplifie l’impulsion budgétaire.",
            "Magie keynésienne : un euro public peut avoir des petits frères.",
            Moyen,
        ),
        card(
            "econ-oat",
            Economie,
            "Les obligations d’État françaises à 10 ans sont aussi connues sous le nom d’OAT.",
            true,
            "Les Obligations Assimilables du Trésor (OAT) sont l’instrument de dette à moyen-long terme le plus courant pour financer l’État français.",
            "Les financiers prononcent « O-A-T » mais pensent « baguette ».",
            Facile,
        ),
        card(
            "econ-triple-deficit",
            Economie,
            "Un pays peut afficher simultanément un déficit public, un déficit commercial et un déficit d’épargne privée : c’est le « triple déficit ».",
            true,
            "On parle de triple déficit quand les trois grands soldes macroéconomiques sont négatifs, souvent signe d’un déséquilibre global.",
            "Un triple combo que même Street Fighter trouverait violent.",
            Costaud,
        ),
        card(
            "econ-quantitative-tightening",
            Economie,
            "Le « quantitative tightening » consiste à racheter massivement des actifs pour soutenir le crédit.",
            false,
            "C’est l’inverse : le quantitative tightening réduit le bilan d’une banque centrale en laissant expirer (ou vendre) des titres, retirant ainsi de la liquidité.",
            "C’est la cure detox après les orgies de liquidités.",
            Moyen,
        ),
        card(
            "law-cdi-trial",
            DroitFrancais,
            "En France, la période d’essai d’un CDI peut être renouvelée si et seulement si un accord de branche le prévoit.",
            true,
            "Le Code du travail n’autorise le renouvellement que si un accord de branche le permet et si cette possibilité est prévue dans le contrat.",
            "Pas d’accord de branche, pas de joker : c’est écrit noir sur blanc.",
            Moyen,
        ),
        card(
            "law-smic-date",
            DroitFrancais,
            "Le SMIC est réévalué automatiquement chaque 1er janvier, sans possibilité de revalorisation en cours d’année.",
            false,
            "Il est revalorisé au 1er janvier, mais des hausses automatiques surviennent aussi si l’inflation dépasse 2 % ou sur décision gouvernementale.",
            "Quand les prix flambent, le SMIC reçoit parfois un rappel surprise.",
            Facile,
        ),
        card(
            "law-cdd-prime",
            DroitFrancais,
            "Les CDD ouvrent droit à une prime de précarité de 10 % sauf exceptions, comme la signature d’un CDI à la suite du contrat.",
            true,
            "La prime est due pour compenser la précarité, sauf cas listés par le Code du travail (rupture anticipée pour faute grave, CDI proposé, etc.).",
            "Le bonus de fin de CDD n’est pas une rumeur TikTok.",
            Facile,
        ),
        card(
            "law-cse-obligation",
            DroitFrancais,
            "La mise en place d’un CSE devient obligatoire à partir de 50 salariés en France.",
            true,
            "Le Comité Social et Économique est obligatoire dès 11 salariés, mais ses attributions complètes apparaissent à 50 salariés.",
            "À 11 déjà, mais à 50 ça devient une vraie tournée de réunions.",
            Facile,
        ),
        card(
            "law-code-civil-1103",
            DroitFrancais,
            "L’article 1103 du Code civil dispose que « les conventions légalement formées tiennent lieu de loi à ceux qui les ont faites ».",
            true,
            "C’est le principe de force obligatoire du contrat, pilier du droit des obligations réaffirmé lors de la réforme de 2016.",
            "Un contrat, ce n’est pas juste un PDF qui prend la poussière.",
            Moyen,
        ),
        card(
            "law-amende-contravention-1",
            DroitFrancais,
            "Une contravention de 1re classe peut entraîner jusqu’à 750 € d’amende pour une personne physique.",
            false,
            "Le plafond est de 38 € pour une contravention de 1re classe ; 750 € correspond au maximum pour la 5e classe.",
            "On garde les 750 € pour les grosses bêtises, pas pour un ticket perdu.",
            Facile,
        ),
    ]
}
