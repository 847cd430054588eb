//! Shared plumbing for the product API crates.

pub mod utils;
