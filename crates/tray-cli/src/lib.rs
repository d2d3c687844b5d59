//! Tray CLI Library
//!
//! Argument handling for the `tray-clean` and `tray-convey` binaries. Console
//! output goes to the writer handed to each `run`, diagnostics to the logger.

pub mod clean;
pub mod convey;


pub use clean::CleanArgs;
pub use convey::ConveyArgs;

/// Start `env_logger` on stderr; `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
