//! Veloboard Library
//!
//! Exposes the application modules to the binary and to integration tests.

pub mod app;
pub mod cli;
pub mod data;
pub mod fetch;
pub mod loading;
pub mod logging;
pub mod ui;
