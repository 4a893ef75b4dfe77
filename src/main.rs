//! Ten-pin scoring runner (default binary).
//!
//! `tenpin score` registers rolls from the command line and prints the game
//! position after each one. `tenpin serve` runs the TCP adapter.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tenpin::adapter::{run_server, ServerConfig};
use tenpin::core::{Game, Scorecard};

#[derive(Parser)]
#[command(name = "tenpin", version, about = "Ten-pin bowling scoring")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register rolls in order and print the running score
    Score {
        #[arg(short, long, default_value = "Player")]
        player: String,
        /// Pin counts, one per roll
        #[arg(required = true, allow_hyphen_values = true)]
        pins: Vec<String>,
    },
    /// Serve games over line-delimited JSON on TCP
    Serve {
        /// Overrides TENPIN_ADAPTER_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides TENPIN_ADAPTER_PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Score { player, pins } => {
            score(&player, &pins);
            Ok(())
        }
        Command::Serve { host, port } => {
            let mut config = ServerConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            tokio::runtime::Runtime::new()?.block_on(run_server(config, None))
        }
    }
}

fn score(player: &str, pins: &[String]) {
    let mut game = Game::new(player);

    for raw in pins {
        match game.register_pins(raw.as_str()) {
            Ok(()) => println!(
                "{:>3} -> frame {:>2} roll {} score {:>3} count_next {}",
                raw,
                game.frame(),
                game.roll(),
                game.score(),
                game.count_next()
            ),
            Err(e) => eprintln!("{:>3} -> {}", raw, e),
        }
    }

    if let Some(card) = game.scorecard() {
        println!("{}", format_scorecard(&card));
    }
    println!(
        "{}: {}{}",
        game.player_name(),
        game.score(),
        if game.is_ended() { " (final)" } else { "" }
    );
}

fn format_scorecard(card: &Scorecard) -> String {
    card.iter()
        .map(|s| match s {
            Some(total) => format!("{:>4}", total),
            None => "   -".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" |")
}
