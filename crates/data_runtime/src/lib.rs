//! data_runtime: document schemas and loaders for the session-start data.
//!
//! The persistence layer hands the session three JSON documents (player,
//! map, enemy master table) plus a TOML tuning config. This crate owns
//! their serde schemas and path resolution so the other crates depend on a
//! stable data API.

pub mod enemy;
pub mod loader;
pub mod map;
pub mod player;
pub mod configs {
    pub mod session;
}
