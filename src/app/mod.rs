// DoseWatch - app/mod.rs
//
// Application layer: view state, session persistence, fixture selection.
// Dependencies: core layer, resolved configuration values.
// Must NOT depend on: ui.

pub mod fixture_mgr;
pub mod session;
pub mod state;
