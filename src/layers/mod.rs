pub mod base;
pub mod binding;
pub mod manager;
