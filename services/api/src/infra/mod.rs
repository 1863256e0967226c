//! Store-backed implementations of the `domain::repository` traits.

pub mod db;
