use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::error::TarotError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMeaning {
    pub name: String,
    pub upright: String,
    pub reversed: String,
}

impl CardMeaning {
    pub fn meaning_for(&self, reversed: bool) -> &str {
        if reversed {
            &self.reversed
        } else {
            &self.upright
        }
    }
}

/// Card name to meaning, in file order. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    cards: Vec<CardMeaning>,
    index: HashMap<String, usize>,
}

impl ReferenceTable {
    /// Inserts a card, replacing an existing entry with the same name in place.
    /// Returns `true` when an earlier entry was overwritten.
    pub(crate) fn insert(&mut self, card: CardMeaning) -> bool {
        match self.index.get(&card.name) {
            Some(&position) => {
                self.cards[position] = card;
                true
            }
            None => {
                self.index.insert(card.name.clone(), self.cards.len());
                self.cards.push(card);
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CardMeaning> {
        self.index.get(name).map(|&position| &self.cards[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.name.as_str()).collect()
    }

    pub fn cards(&self) -> &[CardMeaning] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl FromIterator<CardMeaning> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = CardMeaning>>(iter: I) -> Self {
        let mut table = ReferenceTable::default();
        for card in iter {
            table.insert(card);
        }
        table
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub name: String,
    pub reversed: bool,
}

impl DrawnCard {
    pub fn orientation(&self) -> &'static str {
        if self.reversed {
            "reversed"
        } else {
            "upright"
        }
    }
}

pub type DrawResult = Vec<DrawnCard>;

#[derive(Debug, Clone)]
pub struct InterpretationRequest {
    pub drawn: DrawResult,
    pub context: String,
}

/// The spread sizes offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadSize {
    Three,
    Five,
    Seven,
}

impl SpreadSize {
    pub const ALL: [SpreadSize; 3] = [SpreadSize::Three, SpreadSize::Five, SpreadSize::Seven];

    pub fn count(self) -> usize {
        match self {
            SpreadSize::Three => 3,
            SpreadSize::Five => 5,
            SpreadSize::Seven => 7,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SpreadSize::Three => "3 cards, a focused answer",
            SpreadSize::Five => "5 cards",
            SpreadSize::Seven => "7 cards, a broader view",
        }
    }
}

impl fmt::Display for SpreadSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

impl TryFrom<usize> for SpreadSize {
    type Error = TarotError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        match count {
            3 => Ok(SpreadSize::Three),
            5 => Ok(SpreadSize::Five),
            7 => Ok(SpreadSize::Seven),
            other => Err(TarotError::InvalidConfigValueError {
                field: "cards".to_string(),
                value: other.to_string(),
                reason: "Spread size must be 3, 5 or 7".to_string(),
            }),
        }
    }
}

impl FromStr for SpreadSize {
    type Err = TarotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s
            .trim()
            .parse::<usize>()
            .map_err(|_| TarotError::InvalidConfigValueError {
                field: "cards".to_string(),
                value: s.to_string(),
                reason: "Spread size must be 3, 5 or 7".to_string(),
            })?;
        SpreadSize::try_from(count)
    }
}

/// A drawn card as the presenter shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub name: String,
    pub reversed: bool,
    pub image: Option<PathBuf>,
}

impl CardView {
    pub fn caption(&self) -> String {
        if self.reversed {
            format!("{} (R)", self.name)
        } else {
            self.name.clone()
        }
    }
}
