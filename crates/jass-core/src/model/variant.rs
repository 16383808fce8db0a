use crate::rule::Rule;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named game variant: a rule set plus the target score of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[serde(rename = "SCHIEBER_1000")]
    Schieber1000,
    #[serde(rename = "SCHIEBER_2500")]
    Schieber2500,
    #[serde(rename = "HEARTS")]
    Hearts,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Schieber1000, Variant::Schieber2500, Variant::Hearts];

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Schieber1000 => "SCHIEBER_1000",
            Variant::Schieber2500 => "SCHIEBER_2500",
            Variant::Hearts => "HEARTS",
        }
    }

    pub const fn rule(self) -> Rule {
        match self {
            Variant::Schieber1000 | Variant::Schieber2500 => Rule::Schieber,
            Variant::Hearts => Rule::Hearts,
        }
    }

    pub const fn uses_trump(self) -> bool {
        self.rule().uses_trump()
    }

    /// Points a team needs to win a game. Hearts has no target.
    pub const fn target_score(self) -> Option<i32> {
        match self {
            Variant::Schieber1000 => Some(1000),
            Variant::Schieber2500 => Some(2500),
            Variant::Hearts => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown jass variant '{name}' (expected SCHIEBER_1000, SCHIEBER_2500 or HEARTS)")]
pub struct ParseVariantError {
    pub name: String,
}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name() == name)
            .ok_or_else(|| ParseVariantError {
                name: name.to_string(),
            })
    }
}
