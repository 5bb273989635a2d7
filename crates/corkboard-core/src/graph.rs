//! Connection graph: auto-edges to the center person plus explicit extra links.

use crate::model::{EvidenceItem, ExtraConnection, Person};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Weight used for extra connections that carry none, or zero.
pub const DEFAULT_WEIGHT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

/// Weight of the auto-edge between the center and a person on `tier`.
pub fn tier_weight(tier: u32) -> u32 {
    match tier {
        1 => 3,
        2 => 2,
        _ => 1,
    }
}

/// Builds the board edge list.
///
/// Every non-center person gets exactly one edge to the tier-0 center (when there is one),
/// followed by `extra` in input order. Duplicate and reversed pairs are kept as-is.
pub fn build_connections(persons: &[Person], extra: &[ExtraConnection]) -> Vec<Connection> {
    let mut out = Vec::with_capacity(persons.len() + extra.len());

    if let Some(center) = persons.iter().find(|p| p.is_center()) {
        for p in persons {
            if p.id == center.id {
                continue;
            }
            out.push(Connection {
                from: center.id.clone(),
                to: p.id.clone(),
                weight: tier_weight(p.tier()),
            });
        }
    }

    out.extend(extra.iter().map(|c| Connection {
        from: c.from.clone(),
        to: c.to.clone(),
        weight: c.weight.filter(|w| *w > 0).unwrap_or(DEFAULT_WEIGHT),
    }));

    out
}

#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Person(&'a Person),
    Evidence(&'a EvidenceItem),
}

impl<'a> Entity<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Entity::Person(p) => &p.id,
            Entity::Evidence(e) => &e.id,
        }
    }

    pub fn display_name(&self) -> &'a str {
        match self {
            Entity::Person(p) => p.display_name(),
            Entity::Evidence(e) => e.display_name(),
        }
    }
}

/// Id lookup over every entity on the board. Later records win on id collisions.
#[derive(Debug, Clone, Default)]
pub struct EntityLookup<'a> {
    by_id: FxHashMap<&'a str, Entity<'a>>,
}

impl<'a> EntityLookup<'a> {
    pub fn new(persons: &'a [Person], evidence: &'a [EvidenceItem]) -> Self {
        let mut by_id = FxHashMap::default();
        for p in persons {
            by_id.insert(p.id.as_str(), Entity::Person(p));
        }
        for e in evidence {
            by_id.insert(e.id.as_str(), Entity::Evidence(e));
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<Entity<'a>> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Maps each entity id to the display names of the entities it is connected to.
///
/// Names are pushed for both endpoints of every edge in edge order, so repeated edges yield
/// repeated names. Edges with an endpoint missing from `lookup` are skipped.
pub fn build_connection_map(
    edges: &[Connection],
    lookup: &EntityLookup<'_>,
) -> IndexMap<String, Vec<String>> {
    let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
    for edge in edges {
        let (Some(from), Some(to)) = (lookup.get(&edge.from), lookup.get(&edge.to)) else {
            tracing::debug!(from = %edge.from, to = %edge.to, "skipping edge with unknown endpoint");
            continue;
        };
        map.entry(edge.from.clone())
            .or_default()
            .push(to.display_name().to_string());
        map.entry(edge.to.clone())
            .or_default()
            .push(from.display_name().to_string());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, tier: Option<u32>) -> Person {
        Person {
            id: id.to_string(),
            name: Some(id.to_uppercase()),
            tier,
            ..Default::default()
        }
    }

    #[test]
    fn auto_edges_use_tier_weights() {
        let persons = vec![
            person("c", Some(0)),
            person("a", Some(1)),
            person("b", Some(2)),
            person("d", Some(5)),
            person("e", None),
        ];
        let edges = build_connections(&persons, &[]);
        let weights: Vec<(&str, u32)> = edges.iter().map(|e| (e.to.as_str(), e.weight)).collect();
        assert_eq!(weights, vec![("a", 3), ("b", 2), ("d", 1), ("e", 3)]);
        assert!(edges.iter().all(|e| e.from == "c"));
    }

    #[test]
    fn no_center_means_only_extra_edges() {
        let persons = vec![person("a", Some(1)), person("b", Some(2))];
        let extra = vec![ExtraConnection {
            from: "a".to_string(),
            to: "b".to_string(),
            weight: None,
        }];
        let edges = build_connections(&persons, &extra);
        assert_eq!(
            edges,
            vec![Connection {
                from: "a".to_string(),
                to: "b".to_string(),
                weight: DEFAULT_WEIGHT,
            }]
        );
    }

    #[test]
    fn zero_weight_extra_edge_uses_default() {
        let persons = vec![person("c", Some(0)), person("a", Some(1))];
        let extra = vec![ExtraConnection {
            from: "a".to_string(),
            to: "c".to_string(),
            weight: Some(0),
        }];
        let edges = build_connections(&persons, &extra);
        assert_eq!(edges[1].weight, DEFAULT_WEIGHT);
    }

    #[test]
    fn extra_edges_are_not_deduplicated() {
        let persons = vec![person("c", Some(0)), person("a", Some(1))];
        let extra = vec![
            ExtraConnection {
                from: "a".to_string(),
                to: "c".to_string(),
                weight: Some(2),
            },
            ExtraConnection {
                from: "a".to_string(),
                to: "c".to_string(),
                weight: Some(2),
            },
        ];
        let edges = build_connections(&persons, &extra);
        assert_eq!(edges.len(), 3);

        let lookup = EntityLookup::new(&persons, &[]);
        let map = build_connection_map(&edges, &lookup);
        assert_eq!(map["a"], vec!["C", "C", "C"]);
        assert_eq!(map["c"], vec!["A", "A", "A"]);
    }

    #[test]
    fn unknown_endpoints_are_skipped() {
        let persons = vec![person("a", Some(1))];
        let edges = vec![Connection {
            from: "a".to_string(),
            to: "ghost".to_string(),
            weight: 1,
        }];
        let lookup = EntityLookup::new(&persons, &[]);
        assert!(build_connection_map(&edges, &lookup).is_empty());
    }

    #[test]
    fn evidence_names_resolve_through_lookup() {
        let persons = vec![person("a", Some(1))];
        let evidence = vec![EvidenceItem {
            id: "ev".to_string(),
            label: Some("Ledger".to_string()),
            ..Default::default()
        }];
        let edges = vec![Connection {
            from: "a".to_string(),
            to: "ev".to_string(),
            weight: 1,
        }];
        let lookup = EntityLookup::new(&persons, &evidence);
        let map = build_connection_map(&edges, &lookup);
        assert_eq!(map["a"], vec!["Ledger"]);
        assert_eq!(map["ev"], vec!["A"]);
    }
}
