//! Point d'entrée CLI pour csv2geo

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use csv2geo::cli::{self, Commands};

/// Convertir des fichiers CSV en features vectorielles
#[derive(Parser)]
#[command(name = "csv2geo")]
#[command(author, version)]
#[command(about = "Convertir un CSV en GeoJSON ou en CSV à colonne WKT")]
#[command(
    long_about = "Convertit des enregistrements tabulaires (lignes CSV) en features vectorielles : points depuis des colonnes lat/lon, polylignes et polygones depuis des lignes groupées par nom."
)]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Convert(args) => {
            info!(
                input = %args.input.display(),
                output = %args.output.display(),
                geometry = ?args.geometry,
                "Starting conversion"
            );
            cli::cmd_convert(args)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
