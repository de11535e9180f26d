//! Mapping from raw list records to display entries.

use serde::Serialize;
use std::fmt;

use crate::config::DEFAULT_SPRITE_TEMPLATE;
use crate::errors::MalformedReferenceError;
use crate::gateway::PokemonListResult;

/// One row of the Pokedex list, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokedexListEntry {
    /// Uppercased species name
    pub name: String,
    pub image_url: String,
    /// National Pokedex number
    pub number: u32,
}

impl fmt::Display for PokedexListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03} {}", self.number, self.name)
    }
}

/// Turns [`PokemonListResult`]s into [`PokedexListEntry`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMapper {
    sprite_template: String,
}

impl Default for EntryMapper {
    fn default() -> Self {
        Self::new(DEFAULT_SPRITE_TEMPLATE)
    }
}

impl EntryMapper {
    /// `sprite_template` must contain an `{id}` placeholder.
    pub fn new(sprite_template: impl Into<String>) -> Self {
        Self {
            sprite_template: sprite_template.into(),
        }
    }

    pub fn map(&self, raw: &PokemonListResult) -> Result<PokedexListEntry, MalformedReferenceError> {
        let number = parse_reference_number(&raw.url)?;
        Ok(PokedexListEntry {
            name: raw.name.to_uppercase(),
            image_url: self.sprite_url(number),
            number,
        })
    }

    pub fn sprite_url(&self, number: u32) -> String {
        self.sprite_template.replace("{id}", &number.to_string())
    }
}

/// Map with the default sprite template.
pub fn map_entry(raw: &PokemonListResult) -> Result<PokedexListEntry, MalformedReferenceError> {
    EntryMapper::default().map(raw)
}

/// Extract the Pokedex number from a resource URL such as
/// `https://pokeapi.co/api/v2/pokemon/25/`.
///
/// One trailing `/` is dropped, then the longest run of ASCII digits at the
/// end of the string is parsed.
pub fn parse_reference_number(url: &str) -> Result<u32, MalformedReferenceError> {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    let digit_count = trimmed
        .bytes()
        .rev()
        .take_while(u8::is_ascii_digit)
        .count();
    let digits = &trimmed[trimmed.len() - digit_count..];

    if digits.is_empty() {
        return Err(MalformedReferenceError {
            url: url.to_string(),
        });
    }
    digits.parse().map_err(|_| MalformedReferenceError {
        url: url.to_string(),
    })
}
