pub mod time;

pub use time::{iso_to_millis, Clock, FixedClock, NaiveZone, SystemClock};
