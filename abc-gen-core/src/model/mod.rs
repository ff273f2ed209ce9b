//! Top-level module for the alphabet phrase generator.
//!
//! This crate provides:
//! - Alphabets and their locale strings (`Alphabet`)
//! - Mode state snapshots and their transitions (`Config`)
//! - Per-letter fragment tables (`LetterBank`)
//! - A reproducible seeded stream (`Lcg`)
//! - The generation engine (`Generator`) and its caller-side owner (`Session`)

/// Cyrillic / Latin letter sequences and locale strings.
pub mod alphabet;

/// Mode state: model tier, tone, and the `Config` snapshot.
///
/// Transitions are pure functions returning a new snapshot,
/// including the hard tone → tier 2.0 coupling.
pub mod config;

/// Per-letter fragment tables with a wildcard fallback.
///
/// Supports built-in tables and `.dat` bank files cached with postcard.
pub mod letter_bank;

/// Seeded linear congruential stream and the `UnitSource` seam.
pub mod rng;

/// Line formatting (`{L} — {Theme}: {fragment}`).
pub mod composer;

/// Generation engine: positional and seeded policies.
pub mod generator;

/// Alphabet inference from free text.
pub mod detector;

/// Live mode state, theme resolution and last result.
pub mod session;

/// Image query and URL construction for cards.
pub mod illustration;

/// Single active utterance tracking.
pub mod speech;
