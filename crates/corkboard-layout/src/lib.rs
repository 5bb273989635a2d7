#![forbid(unsafe_code)]

//! Headless radial layout for evidence boards.
//!
//! `corkboard-layout` is used by `corkboard-render` as a pure, runtime-agnostic layout pass: it
//! reads person tiers and evidence order and returns positions, tilts and board extents without
//! touching the input records.

pub mod model;
pub mod radial;

pub use model::{BoardLayout, Placement, Point, Ring, RingKind, RingLabel};
pub use radial::{evidence_rotation, layout_board, min_ring_radius, person_rotation, ring_radius};

use corkboard_core::Dataset;
use corkboard_core::config::LayoutConfig;

/// Lays out every person and evidence item of `dataset`.
pub fn layout_dataset(dataset: &Dataset, config: &LayoutConfig) -> BoardLayout {
    layout_board(&dataset.persons, &dataset.evidence, config)
}
