//! Tray Core Library
//!
//! Schema normalization for tray files and conversion of the legacy
//! hierarchical export into flat tray records.
//!

pub mod cleaner;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod normalize;
pub mod remap;
pub mod utils;
pub mod vfs;

pub use cleaner::{CleanReport, FileOutcome, FileReport, TrayCleaner};
pub use config::TrayConfig;
pub use convert::{flatten, parse_legacy};
pub use error::{Result, TrayError};
pub use model::{ConvertedTray, FlexDirection, LegacyNode, Tray};
pub use normalize::{normalize_tray, normalize_value};
pub use remap::IdRemap;
pub use utils::{Clock, NaiveZone, SystemClock};
