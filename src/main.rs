#![deny(warnings)]

use clap::Parser;
use color_eyre::eyre::Result;

use twitchclone::{
    domain::route::ResolvedRoute,
    infrastructure::{cli::Cli, config::Config, tui::real::RealTui},
    integration::app_runner::AppRunner,
    utils::{initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let config = Config::new()?;

    // A bad deep link fails before the terminal is taken over.
    let start_route = args
        .deep_link
        .as_deref()
        .map(ResolvedRoute::parse)
        .transpose()?;
    if let Some(route) = &start_route {
        log::info!("Opening deep link {}", route.path());
    }

    let tui = RealTui::new()?
        .tick_rate(args.tick_rate)
        .frame_rate(args.frame_rate);
    let mut runner = AppRunner::new_with_real(config, tui, start_route);
    runner.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
