//! Text front-end shared by the terminal Pokedex and the MCP server.
//!
//! This module contains the session wiring, command parsing and all of the
//! rendering functions, so both binaries stay thin.

use std::str::FromStr;
use std::sync::Arc;

use schema::Rgb;

use crate::config::PokedexConfig;
use crate::detail::{PokemonDetail, PokemonDetailPresenter, StatBar};
use crate::gateway::PokemonGateway;
use crate::list::{ListState, LoadOutcome, PokemonListController};
use crate::mapper::PokedexListEntry;
use crate::resource::Resource;

const STAT_BAR_WIDTH: usize = 30;

pub const HELP_TEXT: &str = "\
Commands:
  list [start]        Show the Pokedex from row <start> (loads more near the end)
  more                Load the next page
  search <query>      Filter by name or exact Pokedex number
  clear               Clear the search
  show <name|number>  Show details for one Pokemon
  help                Show this help
  quit                Leave the Pokedex";

/// Whether rendered text may contain ANSI color escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Ansi,
    Plain,
}

impl Palette {
    fn paint(self, color: Rgb, text: &str) -> String {
        match self {
            Palette::Ansi => color.paint(text),
            Palette::Plain => text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { start: usize },
    More,
    Search(String),
    Clear,
    Show(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "list" | "ls" => {
                let start = if rest.is_empty() {
                    0
                } else {
                    rest.parse::<usize>()
                        .map_err(|_| format!("'{}' is not a row number.", rest))?
                };
                Ok(Command::List { start })
            }
            "more" | "next" => Ok(Command::More),
            "search" | "find" => Ok(Command::Search(rest.to_string())),
            "clear" => Ok(Command::Clear),
            "show" | "detail" => {
                if rest.is_empty() {
                    Err("Which Pokemon do you want to see? (e.g., 'show pikachu')".to_string())
                } else {
                    Ok(Command::Show(rest.to_string()))
                }
            }
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("Type 'help' to see the available commands.".to_string()),
            other => Err(format!(
                "Unknown command '{}'. Type 'help' to see the available commands.",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Output(String),
    Quit,
}

/// One user's Pokedex: a list controller and a detail presenter sharing a gateway.
pub struct PokedexSession<G> {
    list: PokemonListController<G>,
    detail: PokemonDetailPresenter<G>,
    palette: Palette,
}

impl<G: PokemonGateway> PokedexSession<G> {
    pub fn new(gateway: Arc<G>, config: &PokedexConfig, palette: Palette) -> Self {
        Self {
            list: PokemonListController::from_config(Arc::clone(&gateway), config),
            detail: PokemonDetailPresenter::new(gateway),
            palette,
        }
    }

    pub fn list(&self) -> &PokemonListController<G> {
        &self.list
    }

    pub fn detail(&self) -> &PokemonDetailPresenter<G> {
        &self.detail
    }

    pub async fn handle_command(&self, line: &str) -> CommandOutcome {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => return CommandOutcome::Output(message),
        };

        let text = match command {
            Command::List { start } => self.scroll_to(start).await,
            Command::More => self.load_more().await,
            Command::Search(query) => self.search(&query),
            Command::Clear => self.search(""),
            Command::Show(target) => render_detail(&self.show(&target).await, self.palette),
            Command::Help => HELP_TEXT.to_string(),
            Command::Quit => return CommandOutcome::Quit,
        };
        CommandOutcome::Output(text)
    }

    /// Show one page-sized window of the displayed list starting at `start`.
    /// Reaching the last displayed row requests the next page first.
    pub async fn scroll_to(&self, start: usize) -> String {
        let window = self.list.snapshot().page_size.max(1) as usize;
        let last_visible = start.saturating_add(window - 1);
        if self.list.should_load_more(last_visible) {
            self.list.load_next_page().await;
        }
        render_window(&self.list.snapshot(), start, window)
    }

    pub async fn load_more(&self) -> String {
        let outcome = self.list.load_next_page().await;
        let state = self.list.snapshot();
        match outcome {
            LoadOutcome::Loaded { added, .. } => {
                let mut output = format!("Loaded {} Pokemon (page {}).\n", added, state.page);
                let new_rows = state.entries.len().saturating_sub(added);
                for entry in &state.entries[new_rows..] {
                    output.push_str(&render_entry(entry));
                    output.push('\n');
                }
                output.push_str(&render_footer(&state));
                output
            }
            LoadOutcome::Skipped if state.end_reached => {
                "You have reached the end of the Pokedex.".to_string()
            }
            LoadOutcome::Skipped => "A page is already loading.".to_string(),
            LoadOutcome::Failed => format!(
                "{}\nType 'more' to try again.",
                state.load_error.as_deref().unwrap_or_default()
            ),
        }
    }

    pub fn search(&self, query: &str) -> String {
        self.list.search(query);
        render_list_state(&self.list.snapshot())
    }

    /// Fetch details by name, or by Pokedex number (resolved through the
    /// cache when possible).
    pub async fn show(&self, target: &str) -> Resource<PokemonDetail> {
        let target = target.trim();
        let name = match target.parse::<u32>() {
            Ok(number) => self
                .list
                .find_cached(number)
                .map(|entry| entry.name)
                .unwrap_or_else(|| number.to_string()),
            Err(_) => target.to_string(),
        };
        self.detail.fetch_detail(&name).await
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }
}

/// `#025 PIKACHU  https://.../25.png`
pub fn render_entry(entry: &PokedexListEntry) -> String {
    format!("{:<20} {}", entry.to_string(), entry.image_url)
}

fn render_footer(state: &ListState) -> String {
    let total = match state.total_count {
        Some(total) => total.to_string(),
        None => "?".to_string(),
    };
    let mut footer = format!(
        "Showing {} of {} loaded (total {})",
        state.entries.len(),
        state.cached_count,
        total
    );
    if !state.query.is_empty() {
        footer.push_str(&format!(", search: '{}'", state.query));
    }
    if state.end_reached {
        footer.push_str(", end of the Pokedex");
    }
    footer
}

pub fn render_list_state(state: &ListState) -> String {
    render_window(state, 0, state.entries.len())
}

/// Rows `start..start + count` of the displayed list, plus status lines.
pub fn render_window(state: &ListState, start: usize, count: usize) -> String {
    let mut output = String::new();
    if state.entries.is_empty() {
        output.push_str(if state.query.is_empty() {
            "No Pokemon loaded yet.\n"
        } else {
            "No Pokemon match your search.\n"
        });
    }
    for entry in state.entries.iter().skip(start).take(count) {
        output.push_str(&render_entry(entry));
        output.push('\n');
    }
    if let Some(status) = render_status(state) {
        output.push_str(&status);
        output.push('\n');
    }
    output.push_str(&render_footer(state));
    output
}

/// A one-line notice for transient state, if any.
pub fn render_status(state: &ListState) -> Option<String> {
    if state.is_loading {
        Some("Loading...".to_string())
    } else {
        state.load_error.clone()
    }
}

/// `SpAtk  109 ██████████████████████████████`
pub fn render_stat_bar(bar: &StatBar, palette: Palette) -> String {
    let filled = (bar.fraction.clamp(0.0, 1.0) * STAT_BAR_WIDTH as f32).round() as usize;
    let blocks = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(STAT_BAR_WIDTH - filled)
    );
    format!(
        "{:<6}{:>4} {}",
        bar.label(),
        bar.value,
        palette.paint(bar.color(), &blocks)
    )
}

pub fn render_detail(resource: &Resource<PokemonDetail>, palette: Palette) -> String {
    let detail = match resource {
        Resource::Loading => return "Loading...".to_string(),
        Resource::Error(message) => return format!("Error: {}", message),
        Resource::Success(detail) => detail,
    };

    let mut output = String::new();
    output.push_str(&palette.paint(detail.dominant_color(), &detail.to_string()));
    output.push('\n');
    if let Some(sprite) = &detail.sprite_url {
        output.push_str(&format!("Sprite: {}\n", sprite));
    }

    let types: Vec<String> = detail
        .types
        .iter()
        .map(|t| palette.paint(t.color(), &format!("[{}]", t)))
        .collect();
    output.push_str(&format!("Type(s): {}\n", types.join(" ")));
    output.push_str(&format!(
        "Weight: {:.1} kg   Height: {:.1} m\n",
        detail.weight_kg, detail.height_m
    ));
    if let Some(exp) = detail.base_experience {
        output.push_str(&format!("Base experience: {}\n", exp));
    }

    output.push_str("Base Stats:\n");
    for bar in detail.stat_bars() {
        output.push_str(&render_stat_bar(&bar, palette));
        output.push('\n');
    }
    output.push_str(&format!("Total {:>5}", detail.base_stat_total()));
    output
}
