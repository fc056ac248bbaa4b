//! arena-server
//!
//! Multi-client async TCP server that pairs players into tic-tac-toe
//! games and referees them.

pub mod config;
pub mod types;
pub mod server;

// these are internal modules, not re-exported
mod client;
mod engine_task;
