//! Pokedex MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp) that
//! lets an LLM page through, search and inspect the Pokedex.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pokedex::interface::{render_detail, Palette, PokedexSession};
use pokedex::{logging, PokeApiClient, PokedexConfig};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing::info;

type SharedSession = Arc<PokedexSession<PokeApiClient>>;

#[derive(Clone)]
pub struct PokedexService {
    tool_router: ToolRouter<PokedexService>,
    session: SharedSession,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListPokemonRequest {
    #[schemars(description = "Row to start from (0-based). Defaults to the first row")]
    pub start: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchPokemonRequest {
    #[schemars(description = "Part of a name, or an exact Pokedex number. Empty clears the search")]
    pub query: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PokemonDetailRequest {
    #[schemars(description = "Pokemon name (e.g. 'pikachu') or Pokedex number")]
    pub name: String,
}

#[tool_router]
impl PokedexService {
    pub fn new(session: SharedSession) -> Self {
        Self {
            tool_router: Self::tool_router(),
            session,
        }
    }

    #[tool(description = "Show one page of the Pokedex list, loading more Pokemon when the window reaches the end")]
    async fn list_pokemon(
        &self,
        Parameters(request): Parameters<ListPokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.session.scroll_to(request.start.unwrap_or(0)).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Load the next page of Pokemon into the Pokedex")]
    async fn load_more_pokemon(&self) -> Result<CallToolResult, McpError> {
        let text = self.session.load_more().await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Filter the loaded Pokemon by name or Pokedex number")]
    async fn search_pokemon(
        &self,
        Parameters(request): Parameters<SearchPokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.session.search(&request.query);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Look up types, size and base stats of one Pokemon")]
    async fn pokemon_detail(
        &self,
        Parameters(request): Parameters<PokemonDetailRequest>,
    ) -> Result<CallToolResult, McpError> {
        let detail = self.session.show(&request.name).await;
        let text = render_detail(&detail, Palette::Plain);
        if detail.is_error() {
            Ok(CallToolResult::error(vec![Content::text(text)]))
        } else {
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
    }
}

#[tool_handler]
impl ServerHandler for PokedexService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Browse the Pokedex: list_pokemon pages through loaded Pokemon, \
                 search_pokemon filters them, pokemon_detail shows one in full."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pokedex-mcp", version, about = "Pokedex MCP server over stdio")]
struct Args {
    /// RON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = PokedexConfig::load(args.config.as_deref())?;
    logging::init(&config.log_level);

    let client = Arc::new(PokeApiClient::from_config(&config)?);
    let session = Arc::new(PokedexSession::new(client, &config, Palette::Plain));
    let service = PokedexService::new(session);

    info!("starting Pokedex MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    info!(?quit_reason, "Pokedex MCP server exiting");
    Ok(())
}
