//! census library
//!
//! This module exports the core functionality of the census binary for use
//! in integration tests and as a library.

pub mod config;
pub mod fetch;
pub mod report;
pub mod run;
