/// Mood Player - terminal host with a simulated audio engine
use clap::{Parser, Subcommand};
use mood_console::{command::HELP, Command, ConsoleConfig, ConsoleHost};
use mood_playback::{Channel, MediaAction, PlayerEvent};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mood-player")]
#[command(about = "Three-channel mood player driven from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./mood.toml if present)
    #[arg(short, long, global = true, env = "MOOD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session reading commands from stdin
    Run,
    /// Scripted walkthrough printing every player event as JSON
    Demo {
        /// Frames to run between scripted steps
        #[arg(short, long, default_value_t = 60)]
        frames: u32,
    },
    /// Print the effective configuration as TOML
    PrintConfig,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mood_player=info,mood_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ConsoleConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run => run(config)?,
        Commands::Demo { frames } => demo(config, frames)?,
        Commands::PrintConfig => {
            config.validate()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn run(config: ConsoleConfig) -> anyhow::Result<()> {
    let mut host = ConsoleHost::new(config)?;
    tracing::info!("Type 'help' for commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(stdout, "> ")?;
            stdout.flush()?;
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Status) => println!("{}", host.status_line()),
            Ok(command) => {
                if let Err(e) = host.execute(command) {
                    tracing::warn!("{}", e);
                }
                print_events(&mut host)?;
                println!("{}", host.status_line());
            }
            Err(e) => println!("{e}"),
        }

        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    Ok(())
}

fn demo(config: ConsoleConfig, frames: u32) -> anyhow::Result<()> {
    let mut host = ConsoleHost::new(config)?;

    let script = [
        Command::Next(Channel::Epic),
        Command::Frames(frames),
        Command::Mute,
        Command::Next(Channel::Epic),
        Command::Frames(frames),
        Command::Prev(Channel::Reflex),
        Command::Frames(frames),
        Command::Seek(90.0),
        Command::Frames(frames),
        Command::Media(MediaAction::SeekBackward { offset: None }),
        Command::Play,
        Command::Frames(frames),
        Command::Play,
        Command::Mute,
        Command::Volume(60),
        Command::Next(Channel::Cool),
        Command::Frames(frames),
        Command::Media(MediaAction::Stop),
    ];

    for command in script {
        tracing::info!("demo: {:?}", command);
        host.execute(command)?;
        print_events(&mut host)?;
    }

    println!("{}", host.status_line());
    Ok(())
}

fn is_position(event: &PlayerEvent) -> bool {
    matches!(event, PlayerEvent::PositionUpdate { .. })
}

fn is_buffering(event: &PlayerEvent) -> bool {
    matches!(event, PlayerEvent::BufferedChanged { .. })
}

/// Print pending events as JSON lines
///
/// Position and buffering updates are printed once per batch (the latest
/// one); a frame run would otherwise print one of each per frame.
fn print_events(host: &mut ConsoleHost) -> anyhow::Result<()> {
    let events = host.drain_events();
    let last_position = events.iter().rposition(is_position);
    let last_buffering = events.iter().rposition(is_buffering);

    for (i, event) in events.iter().enumerate() {
        if is_position(event) && Some(i) != last_position {
            continue;
        }
        if is_buffering(event) && Some(i) != last_buffering {
            continue;
        }
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
