//! Domain types shared across the palisade workspace.
//!
//! Only pure types and decision functions live here; nothing in this crate
//! depends on a web framework or a database driver.

pub mod policy;
pub mod role;
