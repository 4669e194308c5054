use lib::user_list::helpers;
use lib::user_list::models;
use lib::user_list::run_tool::run;

use std::error::Error;
use std::io;

use clap::Parser;
use helpers::{build_store, get_config};
use log::{info, warn};
use models::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    /* Setup logging on stderr so it stays out of the page, RUST_LOG still wins */
    env_logger::builder()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    /* Get all the required resources */
    let args = Args::parse();
    let config = get_config(&args)?;
    let store = build_store(&config)?;
    if let Err(err) = store.check_health().await {
        warn!("User store at {} did not answer: {}", store.base_url(), err);
    }

    /* Serve the page on the terminal */
    let stdin = io::stdin();
    let controller = run(&store, stdin.lock(), io::stdout()).await?;
    info!("Left with {} users in the list", controller.users().len());
    Ok(())
}
