// stance_core/src/lib.rs

// This file defines the public modules of the library.
pub mod classification;
pub mod config;
pub mod contacts;
pub mod context;
pub mod detection;
pub mod error;
pub mod estimation;
pub mod frames;
pub mod logging;
pub mod messages;
pub mod prelude;
pub mod types;
pub mod utils;

#[cfg(test)]
mod testing;
