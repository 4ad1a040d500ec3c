// Root app shell and re-exports for workspace crates used by bins and tests.
pub use data_runtime as data;
pub use grid_core as grid;
pub use session_core as session;
pub use ux_hud as hud;

pub mod boot;
