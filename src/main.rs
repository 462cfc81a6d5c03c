#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_client::{
    init_logging, ui, valid_player_name, ClientConfig, InputSource, SessionEnd, SessionLoop,
    ShutdownToken, StdinInput, TcpTransport, DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST,
    DEFAULT_LOGIN_TIMEOUT, DEFAULT_POLL_INTERVAL, DEFAULT_PORT,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use std::path::PathBuf;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Terminal client for the line-protocol battleship server", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Append a game log to this file.
    log_file: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Player name; prompted for when absent.
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// The server skips the PLACE_SHIP phase.
    #[arg(long)]
    no_placement: bool,
    /// Number of ships the server asks for.
    #[arg(long)]
    fleet_size: Option<usize>,
    /// Wait for local input without watching the connection.
    #[arg(long)]
    no_multiplex: bool,
    /// How often a pending prompt re-checks the connection, in milliseconds.
    #[arg(
        long,
        default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    poll_ms: u64,
    #[arg(
        long,
        default_value_t = DEFAULT_LOGIN_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    login_timeout_secs: u64,
    #[arg(long, help = "Fix RNG seed for reproducible random placement (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[cfg(feature = "std")]
async fn read_player_name(input: &mut StdinInput) -> anyhow::Result<String> {
    loop {
        ui::prompt_name();
        let line = input
            .next_line()
            .await?
            .ok_or_else(|| anyhow::anyhow!("No player name given"))?;
        let name = line.trim();
        if valid_player_name(name) {
            return Ok(name.to_string());
        }
        println!("Names must be non-empty and cannot contain '|', ',' or line breaks.");
    }
}

#[cfg(feature = "std")]
async fn play(cli: Cli) -> anyhow::Result<SessionEnd> {
    let mut input = StdinInput::new();
    let player_name = match cli.name {
        Some(name) if valid_player_name(&name) => name,
        Some(name) => return Err(anyhow::anyhow!("Invalid player name: {:?}", name)),
        None => read_player_name(&mut input).await?,
    };
    let config = ClientConfig {
        player_name,
        email: cli.email,
        expect_placement: !cli.no_placement,
        fleet_size: cli.fleet_size,
        multiplex_input: !cli.no_multiplex,
        poll_interval: Duration::from_millis(cli.poll_ms),
        login_timeout: Duration::from_secs(cli.login_timeout_secs),
        seed: cli.seed,
    };
    if let Some(s) = config.seed {
        println!("Using fixed seed: {} (placement will be reproducible)", s);
    }

    let addr = format!("{}:{}", cli.host, cli.port);
    println!("Connecting to {}...", addr);
    let transport = TcpTransport::connect_timeout(addr.as_str(), DEFAULT_CONNECT_TIMEOUT).await?;
    log::info!("connected to {}", addr);

    let shutdown = ShutdownToken::new();
    shutdown.trigger_on_ctrl_c();

    let mut session = SessionLoop::new(Box::new(transport), Box::new(input), &config, shutdown);
    session.login().await?;
    session.run().await
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let logging = match init_logging(cli.log_file.as_deref()) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            false
        }
    };

    match play(cli).await {
        Ok(SessionEnd::GameOver(summary)) => println!("Game over: {}", summary),
        Ok(SessionEnd::Quit) => println!("You left the game."),
        Ok(SessionEnd::Interrupted) => println!("Interrupted, bye."),
        Err(e) => {
            // The logger echoes errors to stderr on its own.
            if logging {
                log::error!("Game ended with an error: {}", e);
            } else {
                eprintln!("Game ended with an error: {}", e);
            }
            std::process::exit(1);
        }
    }
}
