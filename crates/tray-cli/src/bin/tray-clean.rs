//! Normalize tray files in place.

use clap::Parser;
use tray_cli::{clean, init_logging, CleanArgs};

fn main() -> anyhow::Result<()> {
    let args = CleanArgs::parse();
    let config = args.load_config()?;
    init_logging(&config.logging.level);

    let report = clean::run(&args, &config, &mut std::io::stdout().lock())?;
    log::debug!(
        "{} cleaned, {} removed, {} failed",
        report.cleaned(),
        report.removed(),
        report.failed()
    );
    Ok(())
}
