use std::io::Write;

use anyhow::Result;
use clap::Parser;

use dockyard::cli::{self, CliArgs};
use dockyard::config::DockConfig;

fn main() -> Result<()> {
    dockyard::tracing::init();

    let args = CliArgs::parse();
    let config = DockConfig::load();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let ok = cli::run(args, &config, &mut out)?;
    out.flush()?;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
