use corkboard_core::config::LayoutConfig;
use corkboard_core::{EvidenceItem, EvidenceKind, Person};
use corkboard_layout::{RingKind, layout_board, min_ring_radius};

fn person(id: &str, tier: u32) -> Person {
    Person {
        id: id.to_string(),
        name: Some(id.to_string()),
        tier: Some(tier),
        ..Default::default()
    }
}

fn evidence(id: &str) -> EvidenceItem {
    EvidenceItem {
        id: id.to_string(),
        kind: EvidenceKind::Note,
        ..Default::default()
    }
}

fn scenario() -> (Vec<Person>, Vec<EvidenceItem>) {
    (
        vec![
            person("c", 0),
            person("a", 1),
            person("b", 1),
            person("d", 1),
        ],
        vec![evidence("e1"), evidence("e2")],
    )
}

#[test]
fn layout_is_deterministic() {
    let (persons, ev) = scenario();
    let cfg = LayoutConfig::default();
    let first = layout_board(&persons, &ev, &cfg);
    let second = layout_board(&persons, &ev, &cfg);
    assert_eq!(first, second);

    let a = serde_json::to_vec(&first).expect("serialize");
    let b = serde_json::to_vec(&second).expect("serialize");
    assert_eq!(a, b);
}

#[test]
fn center_with_three_and_two_evidence() {
    let (persons, ev) = scenario();
    let cfg = LayoutConfig::default();
    let layout = layout_board(&persons, &ev, &cfg);

    assert_eq!(layout.width, layout.height);
    assert_eq!(layout.persons[0].x, layout.center.x);
    assert_eq!(layout.persons[0].y, layout.center.y);

    let tier1 = layout.ring_for_tier(1).expect("tier 1 ring");
    let ev_ring = layout.evidence_ring().expect("evidence ring");
    assert_eq!(tier1.radius, 280.0);
    assert!(ev_ring.radius > tier1.radius);
    assert!((ev_ring.radius - (280.0 + 220.0 * 0.85)).abs() < 1e-9);

    for p in &layout.persons[1..] {
        let r = p.point().distance(layout.center);
        assert!((r - tier1.radius).abs() < 1e-6);
    }
    for e in &layout.evidence {
        let r = e.point().distance(layout.center);
        assert!(r > tier1.radius);
    }

    // Board fits the outermost ring plus padding.
    assert!((layout.width - (ev_ring.radius + cfg.padding) * 2.0).abs() < 1e-9);

    // First tier-1 person sits at -PI/2 + 0.45 rad from the center.
    let angle = -std::f64::consts::FRAC_PI_2 + 0.45;
    assert!((layout.persons[1].x - (layout.center.x + angle.cos() * 280.0)).abs() < 1e-9);
    assert!((layout.persons[1].y - (layout.center.y + angle.sin() * 280.0)).abs() < 1e-9);
}

#[test]
fn ring_radius_never_implies_overlap() {
    let cfg = LayoutConfig::default();
    for n in [1usize, 2, 5, 12, 30, 75] {
        let mut persons = vec![person("c", 0)];
        persons.extend((0..n).map(|i| person(&format!("t2-{i}"), 2)));
        persons.extend((0..n / 2 + 1).map(|i| person(&format!("t5-{i}"), 5)));
        let layout = layout_board(&persons, &[], &cfg);
        for ring in &layout.rings {
            assert!(
                ring.radius >= min_ring_radius(ring.count, &cfg) - 1e-9,
                "ring {:?} with {} items too small",
                ring.kind,
                ring.count
            );
        }
    }
}

#[test]
fn empty_board_is_padding_only() {
    let cfg = LayoutConfig::default();
    let layout = layout_board(&[], &[], &cfg);
    assert_eq!(layout.width, cfg.padding * 2.0);
    assert_eq!(layout.height, cfg.padding * 2.0);
    assert!(layout.rings.is_empty());
    assert!(layout.ring_labels.is_empty());
}

#[test]
fn ring_labels_sit_above_each_tier_ring() {
    let cfg = LayoutConfig::default();
    let persons = vec![
        person("c", 0),
        person("a", 1),
        person("b", 2),
        person("d", 3),
        person("e", 6),
    ];
    let layout = layout_board(&persons, &[], &cfg);
    let labels: Vec<&str> = layout.ring_labels.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["INNER CIRCLE", "PERSONS OF INTEREST", "PERIPHERAL", "TIER 6"]
    );
    for label in &layout.ring_labels {
        let ring = layout.ring_for_tier(label.tier).expect("ring");
        assert_eq!(label.x, layout.center.x);
        assert_eq!(label.y, layout.center.y - ring.radius - cfg.label_lift);
    }
    // Ring index counts the center tier, so tier 6 is the fifth key.
    let outer = layout.ring_for_tier(6).expect("tier 6");
    assert_eq!(outer.ring_index, 4);
    assert_eq!(outer.radius, 280.0 + 3.0 * 220.0);
}

#[test]
fn input_records_are_not_modified() {
    let (persons, ev) = scenario();
    let before = (persons.clone(), ev.clone());
    let cfg = LayoutConfig::default();
    let _ = layout_board(&persons, &ev, &cfg);
    let _ = layout_board(&persons, &ev, &cfg);
    assert_eq!((persons, ev), before);
}

#[test]
fn evidence_ring_without_persons() {
    let cfg = LayoutConfig::default();
    let layout = layout_board(&[], &[evidence("x")], &cfg);
    let ring = layout.evidence_ring().expect("evidence ring");
    assert!((ring.radius - 220.0 * 0.85).abs() < 1e-9);
    assert_eq!(ring.kind, RingKind::Evidence);
}
