//! Command-line front end for the Cubeturn cube engine.

#[macro_use]
extern crate lazy_static;

mod cli;
mod prefs;
mod terminal;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();
    color_eyre::install()?;

    let prefs = prefs::Preferences::load(args.prefs.as_deref())?;
    log::debug!("loaded preferences: {prefs:?}");

    cli::exec(args, &prefs)
}
