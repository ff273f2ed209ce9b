//! Alphabet phrase generation library.
//!
//! Given a free-text theme, produces one short themed line per letter of
//! the Cyrillic or Latin alphabet. This crate provides:
//! - Static per-letter fragment banks with a wildcard fallback
//! - Deterministic positional and seeded generation
//! - Alphabet detection and mode state transitions
//! - Helpers for the image and speech front-end collaborators
//!
//! Generation is pure and synchronous; only bank loading touches the disk.

/// Core generation model and its collaborators' helpers.
pub mod model;

/// Error type shared by the crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{GenError, Result};
