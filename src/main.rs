//! Terminal Pokedex.
//!
//! Loads the first page, then reads commands from stdin until `quit` or EOF.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use pokedex::interface::{render_list_state, render_status, CommandOutcome, Palette, PokedexSession};
use pokedex::{logging, PokeApiClient, PokedexConfig, PokedexResult};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error};

#[derive(Debug, Parser)]
#[command(name = "pokedex", version, about = "Browse the PokeAPI Pokedex from a terminal")]
struct Args {
    /// RON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the PokeAPI base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the number of Pokemon fetched per page
    #[arg(long)]
    page_size: Option<u32>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn config(&self) -> PokedexResult<PokedexConfig> {
        let mut config = PokedexConfig::load(self.config.as_deref())?;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        config.validate()?;
        Ok(config)
    }

    fn palette(&self) -> Palette {
        if self.no_color || !std::io::stdout().is_terminal() {
            Palette::Plain
        } else {
            Palette::Ansi
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("pokedex: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> PokedexResult<()> {
    let config = args.config()?;
    logging::init(&config.log_level);
    debug!(base_url = %config.base_url, page_size = config.page_size, "starting pokedex");

    let client = Arc::new(PokeApiClient::from_config(&config)?);
    let session = PokedexSession::new(client, &config, args.palette());

    let mut updates = session.list().subscribe();
    let notices = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(state) => {
                    if let Some(status) = render_status(&state) {
                        eprintln!("{}", status);
                    }
                }
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "status updates lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("Welcome to the Pokedex! Type 'help' for commands.");
    session.list().load_next_page().await;
    println!("{}", render_list_state(&session.list().snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("pokedex> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match session.handle_command(&line).await {
            CommandOutcome::Output(text) => println!("{}", text),
            CommandOutcome::Quit => {
                println!("Goodbye!");
                break;
            }
        }
    }

    notices.abort();
    Ok(())
}
