use crate::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// The six base stats reported by PokeAPI, in API order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Hash,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum StatType {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatType {
    /// Resolve a PokeAPI stat name such as `special-attack`.
    pub fn from_api_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    pub fn api_name(self) -> &'static str {
        self.into()
    }

    /// Short label used next to stat bars.
    pub fn abbreviation(self) -> &'static str {
        match self {
            StatType::Hp => "HP",
            StatType::Attack => "Atk",
            StatType::Defense => "Def",
            StatType::SpecialAttack => "SpAtk",
            StatType::SpecialDefense => "SpDef",
            StatType::Speed => "Spd",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            StatType::Hp => Rgb::from_hex(0xF5FF00),
            StatType::Attack => Rgb::from_hex(0x9EE865),
            StatType::Defense => Rgb::from_hex(0xF5DE69),
            StatType::SpecialAttack => Rgb::from_hex(0x66D4F1),
            StatType::SpecialDefense => Rgb::from_hex(0x899EEA),
            StatType::Speed => Rgb::from_hex(0xE46666),
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}
