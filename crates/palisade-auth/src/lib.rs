//! Authentication primitives shared across palisade services.
//!
//! Provides JWT issue/verification, the bearer [`identity::Identity`]
//! extractor, and password digests.

pub mod identity;
pub mod password;
pub mod token;
