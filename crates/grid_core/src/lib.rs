//! grid_core: grid and unit components shared across session crates.
//!
//! Holds the integer cell coordinate type, tile codes, combat stats and
//! player progression, and the mutable tile grid. Nothing here knows about
//! modes, timers, or presentation.

pub mod components;
pub mod map;

pub use components::{Flags, GridPos, Progress, Stats, TileKind};
pub use map::MapGrid;
