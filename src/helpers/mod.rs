//! Helper functions shared by the index builder and commands

mod date;

pub use date::*;
