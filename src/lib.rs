//! Library exports for sessiongate, shared between the binary and tests.

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod navigation;
pub mod session;
pub mod startup;
pub mod state;
pub mod transport;
pub mod utils;
