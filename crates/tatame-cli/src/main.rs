//! Tatame academy management CLI.

use clap::Parser;

mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, Command};
use crate::commands::App;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbosity.tracing_level_filter());

    match run(cli) {
        Ok(()) => {}
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut app = App::open(&cli)?;
    match cli.command {
        Command::Roster(command) => commands::run_roster(&mut app, command),
        Command::Checkin(args) => commands::run_checkin(&mut app, args),
        Command::Kiosk => commands::run_kiosk(&mut app),
        Command::Finance(command) => commands::run_finance(&mut app, command),
        Command::Plans => {
            commands::run_plans(&app);
            Ok(())
        }
        Command::Products => {
            commands::run_products(&app);
            Ok(())
        }
        Command::Schedule => {
            commands::run_schedule(&app);
            Ok(())
        }
        Command::Alerts => {
            commands::run_alerts(&app);
            Ok(())
        }
        Command::Export(args) => commands::run_export(&app, args),
        Command::Import(args) => commands::run_import(&mut app, args),
        Command::Reset(args) => commands::run_reset(&mut app, &args),
        Command::Login(args) => commands::run_login(&mut app, args),
        Command::Logout => {
            commands::run_logout(&mut app);
            Ok(())
        }
        Command::Sync(command) => commands::run_sync(&mut app, command),
    }
}
