pub mod config;
pub mod constants;
pub mod resolution;
pub mod state;
