//! Helper functions shared by the loader and the commands

mod date;

pub use date::*;
