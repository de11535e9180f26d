//! Single-Pokemon detail view.

use std::fmt;
use std::sync::Arc;

use schema::{PokemonType, Rgb, StatType};
use serde::Serialize;
use tracing::{debug, warn};

use crate::gateway::{PokemonDto, PokemonGateway};
use crate::resource::Resource;

/// Shown to the user for any failed detail fetch.
pub const DETAIL_ERROR_MESSAGE: &str = "Could not load this Pokemon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseStat {
    pub stat: StatType,
    pub value: u32,
}

/// One horizontal bar of the base stats chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatBar {
    pub stat: StatType,
    pub value: u32,
    pub max_value: u32,
    /// `value / max_value`, in `0.0..=1.0`
    pub fraction: f32,
}

impl StatBar {
    pub fn label(&self) -> &'static str {
        self.stat.abbreviation()
    }

    pub fn color(&self) -> Rgb {
        self.stat.color()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    /// In slot order
    pub types: Vec<PokemonType>,
    pub stats: Vec<BaseStat>,
    pub height_m: f32,
    pub weight_kg: f32,
    pub sprite_url: Option<String>,
    pub base_experience: Option<u32>,
}

impl PokemonDetail {
    pub fn from_dto(dto: PokemonDto) -> Self {
        let mut type_slots = dto.types;
        type_slots.sort_by_key(|slot| slot.slot);
        let types = type_slots
            .iter()
            .map(|slot| PokemonType::from_api_name(&slot.type_.name))
            .collect();

        let stats = dto
            .stats
            .iter()
            .filter_map(|entry| match StatType::from_api_name(&entry.stat.name) {
                Some(stat) => Some(BaseStat {
                    stat,
                    value: entry.base_stat,
                }),
                None => {
                    debug!(stat = %entry.stat.name, "ignoring unknown stat");
                    None
                }
            })
            .collect();

        Self {
            id: dto.id,
            name: dto.name,
            types,
            stats,
            height_m: dto.height as f32 / 10.0,
            weight_kg: dto.weight as f32 / 10.0,
            sprite_url: dto.sprites.front_default,
            base_experience: dto.base_experience,
        }
    }

    pub fn max_base_stat(&self) -> u32 {
        self.stats.iter().map(|s| s.value).max().unwrap_or(0)
    }

    /// Bars scaled against this Pokemon's own highest stat.
    pub fn stat_bars(&self) -> Vec<StatBar> {
        let max_value = self.max_base_stat();
        self.stats
            .iter()
            .map(|s| StatBar {
                stat: s.stat,
                value: s.value,
                max_value,
                fraction: if max_value == 0 {
                    0.0
                } else {
                    s.value as f32 / max_value as f32
                },
            })
            .collect()
    }

    /// Background color for the detail view: the primary type's color.
    pub fn dominant_color(&self) -> Rgb {
        self.types
            .first()
            .map(|t| t.color())
            .unwrap_or(Rgb::GRAY)
    }

    pub fn base_stat_total(&self) -> u32 {
        self.stats.iter().map(|s| s.value).sum()
    }
}

impl fmt::Display for PokemonDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03} {}", self.id, self.name.to_uppercase())
    }
}

/// Fetches one Pokemon per call. No caching, no retries.
pub struct PokemonDetailPresenter<G> {
    gateway: Arc<G>,
}

impl<G: PokemonGateway> PokemonDetailPresenter<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn fetch_detail(&self, name: &str) -> Resource<PokemonDetail> {
        let name = name.trim().to_lowercase();
        match self.gateway.fetch_pokemon(&name).await {
            Ok(dto) => Resource::Success(PokemonDetail::from_dto(dto)),
            Err(err) => {
                warn!(%name, error = %err, "failed to load Pokemon detail");
                Resource::Error(DETAIL_ERROR_MESSAGE.to_string())
            }
        }
    }
}
