use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tray_core::config::ConvertConfig;
use tray_core::convert::{flatten, parse_legacy, to_json_line};
use tray_core::{IdRemap, NaiveZone, TrayConfig};

#[derive(Debug, Parser)]
#[command(name = "tray-convey", about = "Flatten a legacy tray export into tray records")]
pub struct ConveyArgs {
    /// Legacy export file (a single JSON tree).
    pub input: Option<PathBuf>,

    /// YAML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Replace every id with a freshly generated UUID v4.
    #[arg(long)]
    pub remap_ids: bool,

    /// Zone for timestamps without an offset: `local` or `utc`.
    #[arg(long)]
    pub naive_tz: Option<NaiveZone>,
}

impl ConveyArgs {
    pub fn load_config(&self) -> anyhow::Result<TrayConfig> {
        TrayConfig::load_or_default(self.config.as_deref()).context("failed to load config")
    }

    /// Flags take precedence over the config file.
    pub fn resolve(&self, config: &TrayConfig) -> ConvertConfig {
        let mut convert = config.convert.clone();
        if let Some(input) = &self.input {
            convert.input = input.clone();
        }
        if let Some(zone) = self.naive_tz {
            convert.naive_timezone = zone;
        }
        convert.remap_ids |= self.remap_ids;
        convert
    }
}

/// Convert the export and write it to `out` as one compact JSON line.
pub fn run(args: &ConveyArgs, config: &TrayConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let settings = args.resolve(config);

    let text = std::fs::read_to_string(&settings.input)
        .with_context(|| format!("cannot read {}", settings.input.display()))?;
    let root = parse_legacy(&text)
        .with_context(|| format!("{} is not a legacy export", settings.input.display()))?;

    let mut records = flatten(&root, settings.naive_timezone)?;
    log::debug!("flattened {} records", records.len());

    if settings.remap_ids {
        let remap = IdRemap::generate(&records);
        log::info!("remapping {} ids", remap.len());
        records = remap.apply(records);
    }

    writeln!(out, "{}", to_json_line(&records)?)?;
    Ok(())
}
