mod app;
mod catalog;
mod cli;
mod config;
mod db;
mod error;
mod event;
mod favorites;
mod ledger;
mod logging;
mod lookup;
mod plan;
mod profile;
mod router;
mod timer;
mod tui;
mod types;
mod ui;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use crate::lookup::OpenFoodFacts;

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    let config = Config::from_cli(&cli_opts);
    if let Some(dir) = config.db_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    if let Err(err) = logging::init(&config.log_path) {
        eprintln!("Logging disabled: {err}");
    }
    tracing::info!(db = %config.db_path.display(), "starting");

    let conn = db::init(&config.db_path)?;
    if let Some(command) = cli_opts.command {
        return cli::run(command, &conn, &config);
    }

    let products = OpenFoodFacts::new(&config.api_base, config.lookup_timeout)?;
    let mut app = app::App::new(conn, Box::new(products));
    let mut terminal = tui::init()?;
    let result = event::run(&mut app, &mut terminal);

    tui::restore()?;
    tracing::info!("exiting");

    result
}
