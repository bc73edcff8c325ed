//! Search sources that can be loaded into a `Manager`.

/// Deezer track, album and playlist lookups.
pub mod deezer;
