use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Board-space anchor of one item: cards hang centered horizontally from `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    /// Card tilt in degrees.
    pub rotation: f64,
}

impl Placement {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "tier")]
pub enum RingKind {
    Tier(u32),
    Evidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub kind: RingKind,
    /// Position of the ring among the sorted tiers (the center tier, when present, is 0).
    pub ring_index: usize,
    pub radius: f64,
    pub count: usize,
    /// Angle of the first item, in radians (0 points right, `-PI/2` points up).
    pub start_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingLabel {
    pub tier: u32,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Output of one layout pass. `persons` and `evidence` are parallel to the input slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub persons: Vec<Placement>,
    pub evidence: Vec<Placement>,
    pub rings: Vec<Ring>,
    pub ring_labels: Vec<RingLabel>,
}

impl BoardLayout {
    pub fn max_radius(&self) -> f64 {
        self.rings.iter().map(|r| r.radius).fold(0.0, f64::max)
    }

    pub fn ring_for_tier(&self, tier: u32) -> Option<&Ring> {
        self.rings.iter().find(|r| r.kind == RingKind::Tier(tier))
    }

    pub fn evidence_ring(&self) -> Option<&Ring> {
        self.rings.iter().find(|r| r.kind == RingKind::Evidence)
    }
}
