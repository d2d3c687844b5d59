//! Print a legacy export as a flat list of tray records.

use clap::Parser;
use tray_cli::{convey, init_logging, ConveyArgs};

fn main() -> anyhow::Result<()> {
    let args = ConveyArgs::parse();
    let config = args.load_config()?;
    init_logging(&config.logging.level);

    convey::run(&args, &config, &mut std::io::stdout().lock())
}
