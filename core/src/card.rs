use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    position: CardIndex,
    symbol: Symbol,
    revealed: bool,
    matched: bool,
}

impl Card {
    pub const fn new(position: CardIndex, symbol: Symbol) -> Self {
        Self {
            position,
            symbol,
            revealed: false,
            matched: false,
        }
    }

    pub const fn position(&self) -> CardIndex {
        self.position
    }

    pub const fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Face up, either while selected or permanently after a match.
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_matched(&self) -> bool {
        self.matched
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn hide(&mut self) {
        self.revealed = false;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.revealed = true;
        self.matched = true;
    }
}
