//! News messages: the JSON record model, indexing, and the search recipes
//! run against a message index.

pub mod indexer;
pub mod model;
pub mod search;
