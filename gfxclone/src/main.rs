use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use gfxclone::prompt::Prompter;
use gfxclone::{discover, retarget, RetargetConfig, RetargetRequest};

mod args;

use args::Cli;

fn main() -> Result<()> {
    let config = RetargetConfig::default();

    // No arguments at all: ask for everything instead
    let request = if std::env::args_os().len() <= 1 {
        init_logging(false);
        interactive_request(&config)?
    } else {
        let cli = Cli::parse();
        init_logging(cli.verbose);
        cli.into_request()?
    };
    log::debug!("{:?}", request);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    retarget::run(&request, &config, &mut out)?;
    out.flush()?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn interactive_request(config: &RetargetConfig) -> Result<RetargetRequest> {
    let default_root = match discover::find_mod_root(config) {
        Ok(root) => root,
        Err(e) => {
            log::debug!("{}", e);
            std::env::current_dir().context("Failed to read the current directory")?
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    Prompter::new(stdin.lock(), stdout.lock())
        .ask_request(config, &default_root)
        .context("Interactive mode aborted")
}
