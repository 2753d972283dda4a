//! Shared test doubles and fixtures for the Code Hygiene merge narrative.

mod clock;
mod delay;
mod fixtures;

pub use clock::FixedClock;
pub use delay::{GatedDelay, InstantDelay, RecordingDelay};
pub use fixtures::{abcd_catalog, catalog_of, section};
