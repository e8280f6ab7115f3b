//! Query execution over committed segments and presentation of the results.

pub mod presenter;
pub mod searcher;
