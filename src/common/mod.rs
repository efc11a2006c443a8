//! # Common Utilities
//!
//! Configuration loading and logger setup shared by the library and the
//! `stego` binary.

pub mod config;
pub mod logging;
