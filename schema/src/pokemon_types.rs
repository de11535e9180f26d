use crate::Rgb;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
    Unknown,
}

// Keyed by the PokeAPI type name.
static TYPE_COLORS: phf::Map<&'static str, Rgb> = phf_map! {
    "normal" => Rgb::from_hex(0xA8A77A),
    "fighting" => Rgb::from_hex(0xC22E28),
    "flying" => Rgb::from_hex(0xA98FF3),
    "poison" => Rgb::from_hex(0xA33EA1),
    "ground" => Rgb::from_hex(0xE2BF65),
    "rock" => Rgb::from_hex(0xB6A136),
    "bug" => Rgb::from_hex(0xA6B91A),
    "ghost" => Rgb::from_hex(0x735797),
    "steel" => Rgb::from_hex(0xB7B7CE),
    "fire" => Rgb::from_hex(0xEE8130),
    "water" => Rgb::from_hex(0x6390F0),
    "grass" => Rgb::from_hex(0x7AC74C),
    "electric" => Rgb::from_hex(0xF7D02C),
    "psychic" => Rgb::from_hex(0xF95587),
    "ice" => Rgb::from_hex(0x96D9D6),
    "dragon" => Rgb::from_hex(0x6F35FC),
    "dark" => Rgb::from_hex(0x705746),
    "fairy" => Rgb::from_hex(0xD685AD),
};

impl PokemonType {
    /// Resolve a PokeAPI type name. Names this client does not know about
    /// (e.g. "shadow") become [`PokemonType::Unknown`].
    pub fn from_api_name(name: &str) -> Self {
        name.trim().parse().unwrap_or(PokemonType::Unknown)
    }

    /// The lowercase name PokeAPI uses for this type.
    pub fn api_name(self) -> &'static str {
        self.into()
    }

    /// Display color for badges and backgrounds.
    pub fn color(self) -> Rgb {
        TYPE_COLORS
            .get(self.api_name())
            .copied()
            .unwrap_or(Rgb::GRAY)
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name().to_uppercase())
    }
}
