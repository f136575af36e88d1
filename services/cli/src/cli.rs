use crate::demo::{run_demo, run_rent_quote, DemoArgs, RentArgs};
use campus_housing::config::AppConfig;
use campus_housing::error::AppError;
use campus_housing::telemetry;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "campus-housing",
    about = "Track residences, student assignments, and maintenance requests",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through residence assignment, rent, and maintenance requests (default command)
    Demo(DemoArgs),
    /// Quote the monthly rent for a residence
    Rent(RentArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, &config.housing),
        Command::Rent(args) => run_rent_quote(args, &config.housing),
    }
}
