//! Scene model: everything needed to draw a board, in board pixel space.
//!
//! A scene is a pure function of (dataset, layout, edges, config). It carries no randomness, so
//! equal inputs produce equal scenes and byte-identical SVG/HTML.

use crate::card::{CardBody, CardKind, CardSource};
use corkboard_core::config::{SceneConfig, ThreadStyle};
use corkboard_core::{Connection, Dataset};
use corkboard_layout::{BoardLayout, Placement, Point, RingLabel};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Which record a card was built from (index into the dataset slice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "index")]
pub enum EntityIndex {
    Person(usize),
    Evidence(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub entity: EntityIndex,
    pub kind: CardKind,
    pub center: bool,
    pub width: f64,
    /// Nominal height (see [`CardKind::nominal_height`]).
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub anchor: Point,
    pub rotation: f64,
    pub body: CardBody,
}

impl Card {
    /// Hit test against the unrotated card rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub from: String,
    pub to: String,
    pub weight: u32,
    pub start: Point,
    pub control: Point,
    pub end: Point,
    pub style: ThreadStyle,
}

impl Thread {
    /// Quadratic curve between the endpoints, sagging below the midpoint.
    pub fn between(start: Point, end: Point, config: &SceneConfig) -> (Point, Point, Point) {
        let sag = (start.distance(end) * config.sag_factor).min(config.max_sag);
        let mid = start.midpoint(end);
        (start, Point::new(mid.x, mid.y + sag), end)
    }

    pub fn path_data(&self) -> String {
        use crate::util::fmt_path;
        format!(
            "M {} {} Q {} {} {} {}",
            fmt_path(self.start.x),
            fmt_path(self.start.y),
            fmt_path(self.control.x),
            fmt_path(self.control.y),
            fmt_path(self.end.x),
            fmt_path(self.end.y)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Draw order: persons first, then evidence.
    pub cards: Vec<Card>,
    pub threads: Vec<Thread>,
    pub ring_labels: Vec<RingLabel>,
    pub yarn_texture: bool,
    pub vignette: bool,
}

impl Scene {
    /// Top-most card under `p` (board space).
    pub fn card_at(&self, p: Point) -> Option<&Card> {
        self.cards.iter().rev().find(|c| c.contains(p))
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().rev().find(|c| c.id == id)
    }
}

fn place_card(
    id: &str,
    entity: EntityIndex,
    kind: CardKind,
    center: bool,
    width: f64,
    placement: &Placement,
    source: &CardSource<'_>,
) -> Card {
    Card {
        id: id.to_string(),
        entity,
        kind,
        center,
        width,
        height: kind.nominal_height(width),
        left: placement.x - width / 2.0,
        top: placement.y,
        anchor: placement.point(),
        rotation: placement.rotation,
        body: kind.build(source),
    }
}

pub fn build_scene(
    dataset: &Dataset,
    layout: &BoardLayout,
    edges: &[Connection],
    config: &SceneConfig,
) -> Scene {
    let mut cards = Vec::with_capacity(dataset.persons.len() + dataset.evidence.len());

    for (idx, (p, placement)) in dataset.persons.iter().zip(&layout.persons).enumerate() {
        let center = p.is_center();
        let width = if center {
            config.widths.center
        } else {
            config.widths.person
        };
        cards.push(place_card(
            &p.id,
            EntityIndex::Person(idx),
            CardKind::Polaroid,
            center,
            width,
            placement,
            &CardSource::person(p),
        ));
    }

    for (idx, (e, placement)) in dataset.evidence.iter().zip(&layout.evidence).enumerate() {
        let kind = CardKind::from(e.kind);
        cards.push(place_card(
            &e.id,
            EntityIndex::Evidence(idx),
            kind,
            false,
            kind.width(&config.widths),
            placement,
            &CardSource::evidence(e),
        ));
    }

    // Later cards win on id collisions, matching draw order.
    let mut anchors: FxHashMap<&str, Point> = FxHashMap::default();
    for card in &cards {
        anchors.insert(card.id.as_str(), card.anchor);
    }

    let mut threads = Vec::with_capacity(edges.len());
    for edge in edges {
        let (Some(&a), Some(&b)) = (anchors.get(edge.from.as_str()), anchors.get(edge.to.as_str()))
        else {
            tracing::debug!(from = %edge.from, to = %edge.to, "no thread for edge with unknown endpoint");
            continue;
        };
        let (start, control, end) = Thread::between(a, b, config);
        threads.push(Thread {
            from: edge.from.clone(),
            to: edge.to.clone(),
            weight: edge.weight,
            start,
            control,
            end,
            style: config.threads.for_weight(edge.weight).clone(),
        });
    }

    Scene {
        width: layout.width,
        height: layout.height,
        cards,
        threads,
        ring_labels: layout.ring_labels.clone(),
        yarn_texture: config.yarn_texture,
        vignette: config.vignette,
    }
}
