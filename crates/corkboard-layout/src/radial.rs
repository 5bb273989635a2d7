//! Concentric ring layout.
//!
//! Properties:
//! - deterministic (no randomness, no clock; tilt is a function of the item index)
//! - ring radius never drops below the circumference needed for its items
//! - square board centered on the tier-0 person

use crate::model::{BoardLayout, Placement, Point, Ring, RingKind, RingLabel};
use corkboard_core::config::LayoutConfig;
use corkboard_core::{EvidenceItem, Person};
use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Smallest radius that fits `count` items of `item_width + min_spacing` around the ring.
pub fn min_ring_radius(count: usize, config: &LayoutConfig) -> f64 {
    count as f64 * (config.item_width + config.min_spacing) / TAU
}

/// Radius of the ring at `ring_index` holding `count` items.
pub fn ring_radius(count: usize, ring_index: usize, config: &LayoutConfig) -> f64 {
    let spaced = config.base_radius + (ring_index as f64 - 1.0) * config.ring_gap;
    spaced.max(min_ring_radius(count, config))
}

/// Tilt in degrees for the `index`-th person, in `[-5, 5]`.
pub fn person_rotation(index: usize) -> f64 {
    (((index % 11) * 7 + 3) % 11) as f64 - 5.0
}

/// Tilt in degrees for the `index`-th evidence item, in `[-4, 4]`.
pub fn evidence_rotation(index: usize) -> f64 {
    (((index % 9) * 5 + 2) % 9) as f64 - 4.0
}

fn place_on_ring(k: usize, count: usize, radius: f64, stagger: f64) -> Point {
    let angle = (k as f64 / count as f64) * TAU - FRAC_PI_2 + stagger;
    Point::new(angle.cos() * radius, angle.sin() * radius)
}

pub fn layout_board(
    persons: &[Person],
    evidence: &[EvidenceItem],
    config: &LayoutConfig,
) -> BoardLayout {
    let mut tiers: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (idx, p) in persons.iter().enumerate() {
        tiers.entry(p.tier()).or_default().push(idx);
    }

    let mut person_pts = vec![Point::ORIGIN; persons.len()];
    let mut rings: Vec<Ring> = Vec::new();
    let mut max_radius: f64 = 0.0;

    for (ring_index, (&tier, members)) in tiers.iter().enumerate() {
        if tier == 0 {
            // Center stays pinned at the origin.
            continue;
        }
        let count = members.len();
        let radius = ring_radius(count, ring_index, config);
        let stagger = ring_index as f64 * config.ring_stagger;
        for (k, &idx) in members.iter().enumerate() {
            person_pts[idx] = place_on_ring(k, count, radius, stagger);
        }
        rings.push(Ring {
            kind: RingKind::Tier(tier),
            ring_index,
            radius,
            count,
            start_angle: stagger - FRAC_PI_2,
        });
        max_radius = max_radius.max(radius);
    }

    let mut evidence_pts = vec![Point::ORIGIN; evidence.len()];
    if !evidence.is_empty() {
        let radius = max_radius + config.ring_gap * config.evidence_ring_factor;
        let count = evidence.len();
        for (k, pt) in evidence_pts.iter_mut().enumerate() {
            *pt = place_on_ring(k, count, radius, config.evidence_stagger);
        }
        rings.push(Ring {
            kind: RingKind::Evidence,
            ring_index: tiers.len(),
            radius,
            count,
            start_angle: config.evidence_stagger - FRAC_PI_2,
        });
        max_radius = max_radius.max(radius);
    }

    let half = max_radius + config.padding;
    let center = Point::new(half, half);

    let persons_out = person_pts
        .iter()
        .enumerate()
        .map(|(i, pt)| Placement {
            x: pt.x + center.x,
            y: pt.y + center.y,
            rotation: person_rotation(i),
        })
        .collect();
    let evidence_out = evidence_pts
        .iter()
        .enumerate()
        .map(|(i, pt)| Placement {
            x: pt.x + center.x,
            y: pt.y + center.y,
            rotation: evidence_rotation(i),
        })
        .collect();

    let ring_labels = rings
        .iter()
        .filter_map(|ring| match ring.kind {
            RingKind::Tier(tier) => Some(RingLabel {
                tier,
                label: config.ring_label(tier),
                x: center.x,
                y: center.y - ring.radius - config.label_lift,
            }),
            RingKind::Evidence => None,
        })
        .collect();

    tracing::debug!(
        persons = persons.len(),
        evidence = evidence.len(),
        rings = rings.len(),
        size = half * 2.0,
        "board layout computed"
    );

    BoardLayout {
        width: half * 2.0,
        height: half * 2.0,
        center,
        persons: persons_out,
        evidence: evidence_out,
        rings,
        ring_labels,
    }
}
