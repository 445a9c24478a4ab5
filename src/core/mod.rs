// DoseWatch - core/mod.rs
//
// Core business logic layer.
// Dependencies: chrono, serde, toml, csv.
// Must NOT depend on: ui, platform, app, or filesystem access.

pub mod calendar;
pub mod export;
pub mod filter;
pub mod fixtures;
pub mod history;
pub mod model;
pub mod supply;
