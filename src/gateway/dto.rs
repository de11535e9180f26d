//! Wire shapes of the PokeAPI responses.
//!
//! Only the fields the client reads are declared; everything else in the
//! payload is ignored. Optional fields default so that sparse or older
//! records still decode.

use serde::Deserialize;

/// `GET /pokemon?limit=&offset=`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PokemonListDto {
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<PokemonListResult>,
}

/// One row of the species index. `url` points at the detail resource and
/// ends in the Pokedex number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PokemonListResult {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// `GET /pokemon/{name}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PokemonDto {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Decimetres
    #[serde(default)]
    pub height: u32,
    /// Hectograms
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlotDto>,
    #[serde(default)]
    pub stats: Vec<StatDto>,
    #[serde(default)]
    pub sprites: SpritesDto,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeSlotDto {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatDto {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpritesDto {
    #[serde(default)]
    pub front_default: Option<String>,
}
