use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::errors::{GatewayError, GatewayResult};
use crate::gateway::dto::{NamedResource, SpritesDto, StatDto, TypeSlotDto};
use crate::gateway::{PokemonDto, PokemonGateway, PokemonListDto, PokemonListResult};
use crate::list::PokemonListController;

const KANTO: [&str; 40] = [
    "bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon", "charizard", "squirtle",
    "wartortle", "blastoise", "caterpie", "metapod", "butterfree", "weedle", "kakuna",
    "beedrill", "pidgey", "pidgeotto", "pidgeot", "rattata", "raticate", "spearow", "fearow",
    "ekans", "arbok", "pikachu", "raichu", "sandshrew", "sandslash", "nidoran-f", "nidorina",
    "nidoqueen", "nidoran-m", "nidorino", "nidoking", "clefairy", "clefable", "vulpix",
    "ninetales", "jigglypuff", "wigglytuff",
];

/// Species name for a Pokedex number, falling back to `mon-<n>` past the table.
pub fn species_name(number: u32) -> String {
    KANTO
        .get(number as usize - 1)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("mon-{}", number))
}

/// An in-memory PokeAPI.
///
/// List pages are generated from `total`: row `i` is Pokedex number `i + 1`.
/// Every request is recorded so tests can assert on what was (not) sent.
///
/// # Example
/// ```ignore
/// let gateway = FakeGateway::new(40).failing_next_lists(1).into_arc();
/// ```
pub struct FakeGateway {
    total: u32,
    pokemon: HashMap<String, PokemonDto>,
    list_failures: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
    list_requests: Mutex<Vec<(u32, u32)>>,
    detail_requests: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            pokemon: HashMap::new(),
            list_failures: AtomicUsize::new(0),
            gate: None,
            list_requests: Mutex::new(Vec::new()),
            detail_requests: Mutex::new(Vec::new()),
        }
    }

    /// The next `count` list requests fail with HTTP 503.
    pub fn failing_next_lists(self, count: usize) -> Self {
        self.list_failures.store(count, Ordering::SeqCst);
        self
    }

    /// List requests wait for a permit on `gate` before answering.
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn with_pokemon(mut self, dto: PokemonDto) -> Self {
        self.pokemon.insert(dto.name.clone(), dto);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Make the next list request fail.
    pub fn fail_next_list(&self) {
        self.list_failures.fetch_add(1, Ordering::SeqCst);
    }

    pub fn list_requests(&self) -> Vec<(u32, u32)> {
        self.list_requests.lock().clone()
    }

    pub fn detail_requests(&self) -> Vec<String> {
        self.detail_requests.lock().clone()
    }

    fn page(&self, limit: u32, offset: u32) -> PokemonListDto {
        let end = offset.saturating_add(limit).min(self.total);
        PokemonListDto {
            count: self.total,
            next: None,
            previous: None,
            results: (offset..end)
                .map(|index| {
                    let number = index + 1;
                    PokemonListResult {
                        name: species_name(number),
                        url: format!("https://pokeapi.co/api/v2/pokemon/{}/", number),
                    }
                })
                .collect(),
        }
    }
}

#[async_trait]
impl PokemonGateway for FakeGateway {
    async fn fetch_pokemon_list(&self, limit: u32, offset: u32) -> GatewayResult<PokemonListDto> {
        self.list_requests.lock().push((limit, offset));

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .expect("test gate closed")
                .forget();
        }

        let should_fail = self
            .list_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(GatewayError::Status {
                url: format!(
                    "https://pokeapi.co/api/v2/pokemon?limit={}&offset={}",
                    limit, offset
                ),
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        Ok(self.page(limit, offset))
    }

    async fn fetch_pokemon(&self, name: &str) -> GatewayResult<PokemonDto> {
        self.detail_requests.lock().push(name.to_string());
        self.pokemon
            .get(name)
            .cloned()
            .ok_or_else(|| GatewayError::Status {
                url: format!("https://pokeapi.co/api/v2/pokemon/{}", name),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}

fn named(name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: String::new(),
    }
}

/// A detail payload with the given types (in slot order) and base stats in
/// API order: hp, attack, defense, special-attack, special-defense, speed.
pub fn pokemon_dto(id: u32, name: &str, types: &[&str], stats: [u32; 6]) -> PokemonDto {
    let stat_names = [
        "hp",
        "attack",
        "defense",
        "special-attack",
        "special-defense",
        "speed",
    ];
    PokemonDto {
        id,
        name: name.to_string(),
        base_experience: Some(64),
        height: 7,
        weight: 69,
        types: types
            .iter()
            .enumerate()
            .map(|(i, t)| TypeSlotDto {
                slot: i as u8 + 1,
                type_: named(t),
            })
            .collect(),
        stats: stat_names
            .iter()
            .zip(stats)
            .map(|(stat, base_stat)| StatDto {
                base_stat,
                effort: 0,
                stat: named(stat),
            })
            .collect(),
        sprites: SpritesDto {
            front_default: Some(format!("https://example.invalid/{}.png", id)),
        },
    }
}

pub fn bulbasaur_dto() -> PokemonDto {
    pokemon_dto(1, "bulbasaur", &["grass", "poison"], [45, 49, 49, 65, 65, 45])
}

/// A controller with the default page size of 20.
pub fn controller(gateway: &Arc<FakeGateway>) -> PokemonListController<FakeGateway> {
    PokemonListController::with_defaults(Arc::clone(gateway))
}
