#![no_std]

extern crate alloc;

use core::fmt;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use leaderboard::*;
pub use scheduler::*;
pub use session::*;
pub use timer::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod leaderboard;
mod scheduler;
mod session;
mod timer;
mod types;

/// How many pairs are dealt in a round. Chosen before a round starts and fixed until the next one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn pairs(self) -> PairCount {
        use Difficulty::*;
        match self {
            Easy => 4,
            Medium => 6,
            Hard => 8,
        }
    }

    pub const fn total_cards(self) -> CardIndex {
        self.pairs() * 2
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }

    /// Unknown names fall back to `Easy`, the 4 pair board.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                log::warn!("Unknown difficulty {:?}, using {}", name, Self::Easy.name());
                Self::Easy
            })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
