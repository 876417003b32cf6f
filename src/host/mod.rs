//! Host page implementations of the switcher's seams

pub mod headless;

#[cfg(feature = "wasm")]
pub mod web;

pub use headless::HeadlessHost;
