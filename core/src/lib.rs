//! taskrank core: task intake, request construction and response classification.
//!
//! Everything here is free of terminal and HTTP concerns; concrete transports
//! live in `taskrank-plugins` and the terminal front-end in `taskrank-cli`.

pub mod analyze;
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod label;
pub mod render;
pub mod strategy;
pub mod task;
pub mod transport;
pub mod util;
