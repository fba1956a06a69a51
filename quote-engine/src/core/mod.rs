//! Core runtime pieces

pub mod config;

pub use config::Config;
