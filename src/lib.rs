// In: src/lib.rs

//! Pokedex Client
//!
//! A paginated, searchable PokeAPI client. The list controller keeps every
//! page fetched so far in a client-side cache, filters it locally for search,
//! and publishes immutable state snapshots to whichever front-end is
//! listening: the terminal Pokedex or the MCP server.

// --- MODULE DECLARATIONS ---
pub mod config;
pub mod detail;
pub mod errors;
pub mod gateway;
pub mod interface;
pub mod list;
pub mod logging;
pub mod mapper;
pub mod resource;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{PokemonType, Rgb, StatType};

// --- From this crate's modules (`src/`) ---

// The core: pagination, cache and search.
pub use list::{ListModel, ListState, LoadOutcome, PageCursor, PokemonListController};

// Mapping and detail entities.
pub use detail::{BaseStat, PokemonDetail, PokemonDetailPresenter, StatBar};
pub use mapper::{map_entry, parse_reference_number, EntryMapper, PokedexListEntry};
pub use resource::Resource;

// Remote gateway.
pub use gateway::{PokeApiClient, PokemonGateway};

// Session wiring shared by the binaries.
pub use config::PokedexConfig;
pub use interface::{Command, CommandOutcome, Palette, PokedexSession};

// Crate-specific error and result types.
pub use errors::{
    ConfigError, ConfigResult, GatewayError, GatewayResult, MalformedReferenceError, PokedexError,
    PokedexResult,
};
