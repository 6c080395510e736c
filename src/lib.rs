//! Command front end for a resume toolchain.
//!
//! Resolves a case-insensitive verb, splits positional arguments into
//! sources and destinations around `TO`, and hands them to a verb handler.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
