//! Stop word lists, one module per language.
//!
//! Lists are lowercase. Kazakh news regularly mixes in Russian, so the
//! Kazakh analyzer applies both lists.

pub mod english;
pub mod kazakh;
pub mod russian;
