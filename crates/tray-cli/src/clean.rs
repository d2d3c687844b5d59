use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tray_core::config::CleanConfig;
use tray_core::vfs::PhysicalFileSystem;
use tray_core::{CleanReport, FileOutcome, TrayCleaner, TrayConfig};

#[derive(Debug, Parser)]
#[command(name = "tray-clean", about = "Normalize tray files in place, deleting nameless ones")]
pub struct CleanArgs {
    /// Directory holding the tray files.
    pub tray_dir: Option<PathBuf>,

    /// YAML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Extension of tray files (their content is JSON).
    #[arg(long)]
    pub extension: Option<String>,

    /// Report what would happen without writing or deleting anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanArgs {
    pub fn load_config(&self) -> anyhow::Result<TrayConfig> {
        TrayConfig::load_or_default(self.config.as_deref()).context("failed to load config")
    }

    /// Flags take precedence over the config file.
    pub fn resolve(&self, config: &TrayConfig) -> CleanConfig {
        let mut clean = config.clean.clone();
        if let Some(dir) = &self.tray_dir {
            clean.tray_dir = dir.clone();
        }
        if let Some(extension) = &self.extension {
            clean.extension = extension.clone();
        }
        clean.dry_run |= self.dry_run;
        clean
    }
}

/// Clean every tray file and write one console line per file to `out`.
pub fn run(args: &CleanArgs, config: &TrayConfig, out: &mut impl Write) -> anyhow::Result<CleanReport> {
    let settings = args.resolve(config);
    let fs = PhysicalFileSystem;
    let report = TrayCleaner::new(&fs)
        .with_extension(settings.extension.as_str())
        .dry_run(settings.dry_run)
        .run(&settings.tray_dir)
        .with_context(|| format!("cannot list tray directory {}", settings.tray_dir.display()))?;

    writeln!(out, "Found {} tray files.", report.found)?;
    for file in &report.files {
        match file.outcome {
            FileOutcome::Removed => log::info!("{file}"),
            _ => writeln!(out, "{file}")?,
        }
    }

    Ok(report)
}
