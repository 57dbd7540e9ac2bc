// Public API for integration tests and potential library usage

pub mod api;
pub mod config;
pub mod host;
pub mod inbox;
pub mod listener;
pub mod outlet;
pub mod protocol;
pub mod state;
pub mod types;
