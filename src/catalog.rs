//! Track catalog: the fixed, ordered list of tracks the owner plays from.
//!
//! The catalog is a cycle: stepping past the last track lands on the first
//! and stepping back from the first lands on the last.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
