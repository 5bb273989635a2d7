#![forbid(unsafe_code)]

//! Evidence-board dataset model, loader and connection graph (headless).
//!
//! Design goals:
//! - records stay untouched by layout and rendering (derived values live elsewhere)
//! - deterministic outputs: no clocks, no randomness
//! - runtime-agnostic async APIs (no specific executor required)

pub mod config;
pub mod error;
pub mod graph;
pub mod load;
pub mod model;

pub use config::BoardConfig;
pub use error::{Error, Result};
pub use graph::{Connection, Entity, EntityLookup, build_connection_map, build_connections};
pub use load::{LoadFailure, LoadOutcome};
pub use model::{Dataset, EvidenceItem, EvidenceKind, ExtraConnection, Media, Person};
