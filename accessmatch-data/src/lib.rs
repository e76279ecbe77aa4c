//! Dataset loading for the accessmatch engine.
//!
//! Responsibilities:
//! - Read JSON dataset documents holding the reference catalog, candidate
//!   records, and job postings.
//! - Turn a loaded [`Dataset`] into the in-memory providers the engine
//!   consumes.
//! - Offer the capability-based filesystem helpers other tools use for
//!   dataset and cache paths.
//!
//! Boundaries:
//! - Scoring rules live in `accessmatch-scorer`; this crate never scores.
//! - Paths are UTF-8 (`camino`) and opened through `cap-std`.

#![forbid(unsafe_code)]

mod dataset;
mod error;
pub mod fs;

pub use dataset::{Dataset, DatasetProviders};
pub use error::DatasetError;
