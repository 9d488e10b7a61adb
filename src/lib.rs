#![forbid(unsafe_code)]
//! treefind: pattern search over directory trees that follows symlinked
//! directories, plus cross-platform path helpers.

pub mod cli;
pub mod error;
pub mod find;
pub mod fs;
pub mod fsutil;
pub mod path;
