//! Symptom catalog: the static registry of selectable symptom cards.

use std::collections::HashMap;

use crate::models::{IllnessType, SymptomCard, SymptomCategory};

/// Id of the symptom that always escalates, whatever else is selected.
pub const BREATHLESSNESS: &str = "breath";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown symptom id: {0}")]
    UnknownSymptom(String),
    #[error("Duplicate symptom id in catalog: {0}")]
    DuplicateSymptom(String),
}

/// Read-only catalog of symptom cards, in display order.
#[derive(Debug, Clone)]
pub struct SymptomCatalog {
    cards: Vec<SymptomCard>,
    index: HashMap<String, usize>,
}

impl SymptomCatalog {
    /// Build a catalog from cards. Ids must be unique.
    pub fn new(cards: Vec<SymptomCard>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(cards.len());
        for (pos, card) in cards.iter().enumerate() {
            if index.insert(card.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateSymptom(card.id.clone()));
            }
        }
        Ok(Self { cards, index })
    }

    /// The student-health catalog shipped with the app.
    pub fn standard() -> Self {
        let cards = standard_cards();
        let index = cards
            .iter()
            .enumerate()
            .map(|(pos, card)| (card.id.clone(), pos))
            .collect();
        Self { cards, index }
    }

    pub fn cards(&self) -> &[SymptomCard] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&SymptomCard> {
        self.index.get(id).map(|&pos| &self.cards[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a card, failing on unknown ids.
    pub fn require(&self, id: &str) -> Result<&SymptomCard, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownSymptom(id.to_string()))
    }

    pub fn by_category(&self, category: SymptomCategory) -> Vec<&SymptomCard> {
        self.cards.iter().filter(|c| c.category == category).collect()
    }

    /// Display titles for the given ids; unknown ids are passed through unchanged.
    pub fn titles_for<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .map(|id| self.get(id).map_or_else(|| id.to_string(), |c| c.title.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn standard_cards() -> Vec<SymptomCard> {
    use IllnessType::{Cold, Flu, Warning};
    use SymptomCategory::{Chest, General, Head, Throat};

    vec![
        SymptomCard::new("fever", "Fever", "Body temp > 37.5°C.", Cold, "🌡️", General),
        SymptomCard::new("headache", "Headache", "Intense pressure.", Flu, "🧠", Head),
        SymptomCard::new("throat", "Sore Throat", "Painful swallowing.", Cold, "👄", Throat),
        SymptomCard::new("cough", "Dry Cough", "Persistent tickle.", Flu, "🫁", Chest),
        SymptomCard::new("fatigue", "Fatigue", "Feeling very weak.", Flu, "🔋", General),
        SymptomCard::new(BREATHLESSNESS, "Breathless", "Difficulty breathing.", Warning, "⚠️", Chest),
    ]
}
