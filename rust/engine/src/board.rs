//! Three-row open-face board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::{parse_cards, Card};
use crate::errors::GameError;

/// Cards on a finished board (3 + 5 + 5).
pub const BOARD_SIZE: usize = 13;

/// One of the three rows of a board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Row {
    /// Three-card row; must be the weakest.
    Top,
    /// Five-card row between top and bottom.
    Middle,
    /// Five-card row; must be the strongest.
    Bottom,
}

impl Row {
    /// Rows in display order.
    pub const ALL: [Row; 3] = [Row::Top, Row::Middle, Row::Bottom];

    pub fn capacity(self) -> usize {
        match self {
            Row::Top => 3,
            Row::Middle | Row::Bottom => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Row::Top => "Top",
            Row::Middle => "Middle",
            Row::Bottom => "Bottom",
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Row {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "t" => Ok(Row::Top),
            "middle" | "mid" | "m" => Ok(Row::Middle),
            "bottom" | "bot" | "b" => Ok(Row::Bottom),
            other => Err(format!("Unknown row '{}' (use top, mid or bot)", other)),
        }
    }
}

/// A player's board: top, middle and bottom rows in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub top: Vec<Card>,
    pub middle: Vec<Card>,
    pub bottom: Vec<Card>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from explicit rows, rejecting any row over capacity.
    pub fn from_rows(top: Vec<Card>, middle: Vec<Card>, bottom: Vec<Card>) -> Result<Self, GameError> {
        let board = Self {
            top,
            middle,
            bottom,
        };
        for row in Row::ALL {
            if board.row(row).len() > row.capacity() {
                return Err(GameError::RowFull { row });
            }
        }
        Ok(board)
    }

    /// Parses `"<top>/<middle>/<bottom>"` card-code notation.
    pub fn parse(s: &str) -> Result<Self, GameError> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 3 {
            return Err(GameError::BoardIncomplete(format!(
                "expected three '/'-separated rows, got {}",
                parts.len()
            )));
        }
        Self::from_rows(
            parse_cards(parts[0])?,
            parse_cards(parts[1])?,
            parse_cards(parts[2])?,
        )
    }

    pub fn row(&self, row: Row) -> &[Card] {
        match row {
            Row::Top => &self.top,
            Row::Middle => &self.middle,
            Row::Bottom => &self.bottom,
        }
    }

    fn row_mut(&mut self, row: Row) -> &mut Vec<Card> {
        match row {
            Row::Top => &mut self.top,
            Row::Middle => &mut self.middle,
            Row::Bottom => &mut self.bottom,
        }
    }

    pub fn is_row_full(&self, row: Row) -> bool {
        self.row(row).len() >= row.capacity()
    }

    /// Appends `card` to `row`; rejects a full row without modifying the board.
    pub fn push(&mut self, row: Row, card: Card) -> Result<(), GameError> {
        if self.is_row_full(row) {
            return Err(GameError::RowFull { row });
        }
        self.row_mut(row).push(card);
        Ok(())
    }

    /// Removes `card` from whichever row holds it.
    pub fn remove(&mut self, card: Card) -> Option<Row> {
        let row = self.find(card)?;
        let cards = self.row_mut(row);
        let idx = cards.iter().position(|c| *c == card)?;
        cards.remove(idx);
        Some(row)
    }

    pub fn find(&self, card: Card) -> Option<Row> {
        Row::ALL.into_iter().find(|&r| self.row(r).contains(&card))
    }

    pub fn contains(&self, card: Card) -> bool {
        self.find(card).is_some()
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.middle.len() + self.bottom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn open_slots(&self) -> usize {
        Row::ALL
            .iter()
            .map(|&r| r.capacity() - self.row(r).len())
            .sum()
    }

    pub fn is_complete(&self) -> bool {
        Row::ALL.iter().all(|&r| self.row(r).len() == r.capacity())
    }

    /// Row lengths as `[top, middle, bottom]`.
    pub fn row_lengths(&self) -> [usize; 3] {
        [self.top.len(), self.middle.len(), self.bottom.len()]
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.top.iter().chain(self.middle.iter()).chain(self.bottom.iter())
    }

    /// Fails with [`GameError::BoardIncomplete`] unless every row is full.
    pub fn ensure_complete(&self, label: &str) -> Result<(), GameError> {
        for row in Row::ALL {
            if self.row(row).len() != row.capacity() {
                return Err(GameError::BoardIncomplete(format!(
                    "{}.{} must contain exactly {} cards",
                    label,
                    row.label().to_ascii_lowercase(),
                    row.capacity()
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in Row::ALL.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let codes: Vec<String> = self.row(row).iter().map(Card::code).collect();
            write!(f, "{}: {}", row.label().to_ascii_uppercase(), codes.join(" "))?;
        }
        Ok(())
    }
}
