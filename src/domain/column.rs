use crate::domain::card::{Card, CardId, CardType};
use crate::domain::query;
use crate::error::{JanbanError, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Session-scoped identity token for a column. Card back-references point
/// at this token rather than the column's name, so renames never have to
/// rewrite cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(Uuid);

impl ColumnId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// One stage of a board's workflow, holding the cards currently in that
/// stage. Card order is insertion order and doubles as display priority;
/// membership is a set keyed by card identity.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    #[serde(skip)]
    id: ColumnId,
    name: String,
    cards: Vec<Card>,
}

impl Column {
    /// Substituted for a blank name instead of rejecting the column.
    pub const DEFAULT_NAME: &'static str = "Unnamed Column";

    pub const MAX_NAME_LENGTH: usize = 25;

    /// Creates an empty column. A blank name is silently replaced by
    /// [`Column::DEFAULT_NAME`]; a name longer than
    /// [`Column::MAX_NAME_LENGTH`] is rejected.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: ColumnId::generate(),
            name: Self::validate_name(name.into())?,
            cards: Vec::new(),
        })
    }

    pub(crate) fn validate_name(name: String) -> Result<String> {
        if name.len() > Self::MAX_NAME_LENGTH {
            return Err(JanbanError::InvalidColumnName(name));
        }

        if name.trim().is_empty() {
            Ok(Self::DEFAULT_NAME.to_string())
        } else {
            Ok(name)
        }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // Renames go through KanbanBoard::edit_column_name so the board can
    // keep its completed-column cache coherent.
    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains_card(&self, id: CardId) -> bool {
        self.cards.iter().any(|card| card.id() == id)
    }

    /// Appends a card and points its back-reference at this column. Adding
    /// a card that is already present (by identity) is a no-op.
    pub fn add_card(&mut self, mut card: Card) {
        if self.contains_card(card.id()) {
            return;
        }

        card.set_containing_column(Some(self.id));
        self.cards.push(card);
    }

    /// Removes a card by identity, clearing its back-reference and handing
    /// ownership back. Returns `None` when the card is absent.
    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        let position = self.cards.iter().position(|card| card.id() == id)?;
        let mut card = self.cards.remove(position);
        card.set_containing_column(None);
        Some(card)
    }

    pub fn card_at(&self, index: usize) -> Result<&Card> {
        self.cards.get(index).ok_or(JanbanError::IndexOutOfRange {
            index,
            len: self.cards.len(),
        })
    }

    pub fn card_at_mut(&mut self, index: usize) -> Result<&mut Card> {
        let len = self.cards.len();
        self.cards
            .get_mut(index)
            .ok_or(JanbanError::IndexOutOfRange { index, len })
    }

    /// Returns the cards matching at least one keyword, most relevant
    /// first. With no keywords every card is returned in original order.
    pub fn get_cards_with_query(&self, keywords: &BTreeSet<String>) -> Vec<&Card> {
        if keywords.is_empty() {
            return self.cards.iter().collect();
        }

        query::rank_by_relevancy(&self.cards, keywords)
    }

    /// Returns the cards of the given type, in original order.
    pub fn get_cards_of_type(&self, card_type: CardType) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|card| card.card_type() == card_type)
            .collect()
    }

    /// Total story points across all cards in this column.
    pub fn total_story_points(&self) -> i32 {
        self.cards.iter().map(Card::story_points).sum()
    }
}

/// Field-wise equality over the serialized fields; identity tokens are
/// excluded so that a round-tripped column compares equal to its original.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.cards == other.cards
    }
}

impl Eq for Column {}
