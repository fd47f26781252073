//! `lorebook` — command-line interface for the Lorebook content API.

mod app;
mod cli;
mod config;

use clap::Parser;

use crate::app::App;
use crate::cli::CliArgs;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let app = match App::from_args(&args) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run(args).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
