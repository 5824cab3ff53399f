//! Application module: the main window's model.
//!
//! `App` owns the canonical player state (through `Owner`), the optional
//! popout handle and which of the two windows has keyboard focus.

mod model;

pub use model::*;
