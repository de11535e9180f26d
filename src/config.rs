//! Client configuration.
//!
//! Values come from built-in defaults, optionally overlaid by a RON file such as:
//!
//! ```ron
//! (
//!     base_url: "https://pokeapi.co/api/v2/",
//!     page_size: 20,
//!     log_level: "debug",
//! )
//! ```
//!
//! Fields left out of the file keep their defaults.

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";
pub const DEFAULT_SPRITE_TEMPLATE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokedexConfig {
    /// Root of the PokeAPI, with a trailing slash.
    pub base_url: String,
    /// Sprite URL with an `{id}` placeholder for the Pokedex number.
    pub sprite_template: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sprite_template: DEFAULT_SPRITE_TEMPLATE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
            user_agent: concat!("pokedex/", env!("CARGO_PKG_VERSION")).to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PokedexConfig {
    /// Load from `path` if given, otherwise return validated defaults.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_ron(&text, &path.display().to_string())?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse RON text. `origin` only labels errors.
    pub fn from_ron(text: &str, origin: &str) -> ConfigResult<Self> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid {
                field: "page_size",
                reason: format!("must be between 1 and {}", MAX_PAGE_SIZE),
            });
        }
        if !self.sprite_template.contains("{id}") {
            return Err(ConfigError::Invalid {
                field: "sprite_template",
                reason: "must contain an {id} placeholder".to_string(),
            });
        }
        self.api_base()?;
        Ok(())
    }

    /// The base URL, normalized to end in `/` so relative joins keep the path.
    pub fn api_base(&self) -> ConfigResult<Url> {
        let mut base = self.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base).map_err(|err| ConfigError::Invalid {
            field: "base_url",
            reason: err.to_string(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults_are_valid() {
        let config = PokedexConfig::load(None).expect("defaults should validate");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = PokedexConfig::from_ron("(page_size: 50, log_level: \"debug\")", "inline")
            .expect("valid RON");

        assert_eq!(config.page_size, 50);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.sprite_template, DEFAULT_SPRITE_TEMPLATE);
    }

    #[test]
    fn test_malformed_ron_reports_origin() {
        let err = PokedexConfig::from_ron("(page_size: ", "pokedex.ron").unwrap_err();
        assert!(err.to_string().contains("pokedex.ron"));
    }

    #[rstest]
    #[case(0)]
    #[case(MAX_PAGE_SIZE + 1)]
    fn test_page_size_out_of_range(#[case] page_size: u32) {
        let config = PokedexConfig {
            page_size,
            ..PokedexConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "page_size", .. })
        ));
    }

    #[test]
    fn test_sprite_template_needs_placeholder() {
        let config = PokedexConfig {
            sprite_template: "https://example.invalid/sprite.png".to_string(),
            ..PokedexConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_base_gains_trailing_slash() {
        let config = PokedexConfig {
            base_url: "http://localhost:8080/api/v2".to_string(),
            ..PokedexConfig::default()
        };
        assert_eq!(
            config.api_base().unwrap().as_str(),
            "http://localhost:8080/api/v2/"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = PokedexConfig {
            base_url: "not a url".to_string(),
            ..PokedexConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "base_url", .. })
        ));
    }
}
