use serde::{Deserialize, Serialize};

/// Position of a card on the board, `0..total_cards`.
pub type CardIndex = u8;

/// Count type used for pairs per board and matched pairs.
pub type PairCount = u8;

pub type Score = u32;

/// Whole seconds on the round clock.
pub type Seconds = u32;

/// Points awarded for every matched pair.
pub const POINTS_PER_PAIR: Score = 10;

/// The creatures printed on card faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Unicorn,
    Fairy,
    Elf,
    Tulip,
    Evergreen,
    Mushroom,
    Butterfly,
    Leaf,
}

impl Symbol {
    /// Decks always take a prefix of this list, in this order.
    pub const CATALOG: [Symbol; 8] = [
        Self::Unicorn,
        Self::Fairy,
        Self::Elf,
        Self::Tulip,
        Self::Evergreen,
        Self::Mushroom,
        Self::Butterfly,
        Self::Leaf,
    ];

    pub const fn glyph(self) -> &'static str {
        use Symbol::*;
        match self {
            Unicorn => "🦄",
            Fairy => "🧚\u{200d}♀\u{fe0f}",
            Elf => "🧝\u{200d}♂\u{fe0f}",
            Tulip => "🌷",
            Evergreen => "🌲",
            Mushroom => "🍄",
            Butterfly => "🦋",
            Leaf => "🍃",
        }
    }
}

/// Generation counter identifying one round. Deferred work is tagged with the round it was
/// scheduled for so that a newer round can tell stale callbacks apart.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(u32);

impl RoundId {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
