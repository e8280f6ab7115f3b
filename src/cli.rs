//! Command line interface for kazsearch.

pub mod args;
pub mod commands;
pub mod output;
