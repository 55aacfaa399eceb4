//! The four-valued season enumeration shared by the lexer, the AST and the runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A season, totally ordered by its ordinal (`Winter` = 0 … `Fall` = 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Ordinal 0
    Winter,
    /// Ordinal 1
    Spring,
    /// Ordinal 2
    Summer,
    /// Ordinal 3
    Fall,
}

impl Season {
    /// All seasons in ordinal order
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Returns the season with the given ordinal, if it is in `0..=3`
    pub fn from_ordinal(ordinal: i64) -> Option<Season> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Returns the ordinal of this season
    pub fn ordinal(self) -> i64 {
        self as i64
    }

    /// Looks up a season by its source-level name (`Winter`, `Spring`, `Summer`, `Fall`)
    pub fn from_name(name: &str) -> Option<Season> {
        match name {
            "Winter" => Some(Season::Winter),
            "Spring" => Some(Season::Spring),
            "Summer" => Some(Season::Summer),
            "Fall" => Some(Season::Fall),
            _ => None,
        }
    }

    /// Source-level name of this season
    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
