//! Reqwest-backed PokeAPI gateway.
//!
//! Owns transport details only: URL building, timeouts, status mapping and
//! JSON decoding into the wire DTOs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{PokemonDto, PokemonListDto};
use super::PokemonGateway;
use crate::config::PokedexConfig;
use crate::errors::{GatewayError, GatewayResult, PokedexResult};

pub struct PokeApiClient {
    client: Client,
    base: Url,
}

impl PokeApiClient {
    /// Build a client against `base` with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &PokedexConfig) -> PokedexResult<Self> {
        let base = config.api_base()?;
        Self::new(base.clone(), config.request_timeout(), &config.user_agent).map_err(|source| {
            GatewayError::Transport {
                url: base.to_string(),
                source,
            }
            .into()
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn list_url(&self, limit: u32, offset: u32) -> GatewayResult<Url> {
        let mut url = self.base.join("pokemon")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        Ok(url)
    }

    /// `name` becomes a single, percent-encoded path segment.
    pub fn pokemon_url(&self, name: &str) -> GatewayResult<Url> {
        let mut url = self.base.join("pokemon/")?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> GatewayResult<T> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|err| GatewayError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl PokemonGateway for PokeApiClient {
    async fn fetch_pokemon_list(&self, limit: u32, offset: u32) -> GatewayResult<PokemonListDto> {
        let url = self.list_url(limit, offset)?;
        self.get_json(url).await
    }

    async fn fetch_pokemon(&self, name: &str) -> GatewayResult<PokemonDto> {
        let url = self.pokemon_url(name)?;
        self.get_json(url).await
    }
}
