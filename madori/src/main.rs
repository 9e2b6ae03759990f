mod compute;
mod config;
mod hotkey;
#[cfg(target_os = "macos")]
mod macos;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use argh::FromArgs;
use madori_layout::BoxMuller;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(FromArgs)]
/// Snap the focused window to the center or a half of its screen.
struct Args {
    /// path to the config file (default: ~/.config/madori/config.toml)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    #[argh(subcommand)]
    command: Option<Subcommand>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Subcommand {
    Run(RunArgs),
    Compute(ComputeArgs),
    Bindings(BindingsArgs),
}

#[derive(FromArgs)]
/// Listen for hotkeys and place the focused window (default).
#[argh(subcommand, name = "run")]
struct RunArgs {}

#[derive(FromArgs)]
/// Read placement requests as JSON lines on stdin, answer on stdout.
#[argh(subcommand, name = "compute")]
struct ComputeArgs {
    /// seed for the random centering bias, for reproducible output
    #[argh(option)]
    seed: Option<u64>,
}

#[derive(FromArgs)]
/// Print the hotkey table.
#[argh(subcommand, name = "bindings")]
struct BindingsArgs {}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();
    let config = config::load(args.config.as_deref());

    match args.command.unwrap_or(Subcommand::Run(RunArgs {})) {
        Subcommand::Run(_) => run(config),
        Subcommand::Compute(cmd) => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            match cmd.seed {
                Some(seed) => compute::run_filter(
                    stdin.lock(),
                    stdout.lock(),
                    &config.placement,
                    &config.presets,
                    &mut BoxMuller::new(StdRng::seed_from_u64(seed)),
                ),
                None => compute::run_filter(
                    stdin.lock(),
                    stdout.lock(),
                    &config.placement,
                    &config.presets,
                    &mut BoxMuller::from_entropy(),
                ),
            }
        }
        Subcommand::Bindings(_) => {
            let mut hotkeys: Vec<_> = config.hotkeys()?.into_iter().collect();
            hotkeys.sort_by_key(|(key, _)| *key);
            for (key, mode) in hotkeys {
                println!("{:<24} {}", hotkey::format_hotkey(&key), mode);
            }
            Ok(())
        }
    }
}

#[cfg(target_os = "macos")]
fn run(config: Config) -> Result<()> {
    tracing::info!("madori starting");
    macos::run(config)
}

#[cfg(not(target_os = "macos"))]
fn run(_config: Config) -> Result<()> {
    anyhow::bail!("the hotkey listener is only available on macOS; try `madori compute`")
}
