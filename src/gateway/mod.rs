//! Remote data gateway.
//!
//! The list controller and detail presenter only see [`PokemonGateway`];
//! [`PokeApiClient`] is the HTTP implementation used by the binaries.

pub mod dto;
pub mod http;

use async_trait::async_trait;

use crate::errors::GatewayResult;

pub use dto::{NamedResource, PokemonDto, PokemonListDto, PokemonListResult};
pub use http::PokeApiClient;

/// Read-only access to the PokeAPI resources the Pokedex needs.
#[async_trait]
pub trait PokemonGateway: Send + Sync {
    /// One page of the species index.
    async fn fetch_pokemon_list(&self, limit: u32, offset: u32) -> GatewayResult<PokemonListDto>;

    /// The full record for one Pokemon. `name` is expected lowercase.
    async fn fetch_pokemon(&self, name: &str) -> GatewayResult<PokemonDto>;
}
