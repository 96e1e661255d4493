//! Command handlers.
//!
//! Handlers write operator-facing text to the given writer and return
//! errors with context; `main` prints them.

pub mod assets;
pub mod auth;
pub mod scan;
