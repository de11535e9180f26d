// Pokedex Schema - Shared type definitions
// This crate holds the static vocabulary shared by the Pokedex client and its
// front-ends: Pokemon types, base stat kinds, and the color tables used to
// render them.

// Re-export the main types
pub use color::*;
pub use pokemon_types::*;
pub use stat_types::*;

pub mod color;
pub mod pokemon_types;
pub mod stat_types;
