//! foafname Runtime
//!
//! Wires the core and network layers into the email → name lookup.

pub mod lookup;

pub use lookup::*;
