//! Conversion from the untyped upstream shape to the typed element model.

use tracing::debug;

use super::raw::{RawElement, RawMember};
use super::types::{Element, Member, MemberType, Point, Relation, Way};

/// Converts one decoded upstream element into its typed form.
///
/// The mapping is a pure function of the input and cannot fail:
///
/// - `node` becomes [`Element::Point`] (coordinates copied verbatim,
///   including zeros)
/// - `way` becomes [`Element::Way`] with the `nodes` list as `member_ids`
/// - `relation` becomes [`Element::Relation`] with each member mapped
///   through [`member_type_from_wire`]
/// - any other kind converts to `None` and is excluded from the output
pub fn convert(raw: RawElement) -> Option<Element> {
    match raw.kind.as_str() {
        "node" => Some(Element::Point(Point {
            id: raw.id,
            lat: raw.lat,
            lon: raw.lon,
            tags: raw.tags,
        })),
        "way" => Some(Element::Way(Way {
            id: raw.id,
            member_ids: raw.nodes,
            tags: raw.tags,
        })),
        "relation" => Some(Element::Relation(Relation {
            id: raw.id,
            members: raw.members.into_iter().map(convert_member).collect(),
            tags: raw.tags,
        })),
        other => {
            debug!(kind = other, id = raw.id, "dropping element of unrecognized kind");
            None
        }
    }
}

/// Maps an upstream member kind string to a [`MemberType`].
///
/// Unrecognized strings fall back to [`MemberType::Point`] rather than
/// failing; relation members are never dropped.
pub fn member_type_from_wire(kind: &str) -> MemberType {
    match kind {
        "way" => MemberType::Way,
        "relation" => MemberType::Relation,
        "node" => MemberType::Point,
        other => {
            debug!(kind = other, "unrecognized member kind, treating as point");
            MemberType::Point
        }
    }
}

fn convert_member(member: RawMember) -> Member {
    Member {
        member_type: member_type_from_wire(&member.kind),
        ref_id: member.ref_id,
        role: member.role,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_node_converts_to_point_verbatim() {
        let raw = RawElement {
            kind: "node".to_string(),
            id: 1,
            lat: 52.5,
            lon: 13.4,
            tags: tags(&[("name", "X")]),
            ..Default::default()
        };

        let element = convert(raw).unwrap();
        assert_eq!(
            element,
            Element::Point(Point {
                id: 1,
                lat: 52.5,
                lon: 13.4,
                tags: tags(&[("name", "X")]),
            })
        );
    }

    #[test]
    fn test_zero_coordinates_are_preserved() {
        let raw = RawElement {
            kind: "node".to_string(),
            id: 7,
            ..Default::default()
        };

        match convert(raw).unwrap() {
            Element::Point(p) => {
                assert_eq!(p.lat, 0.0);
                assert_eq!(p.lon, 0.0);
            }
            other => panic!("expected point, got {other:?}"),
        }
    }

    #[test]
    fn test_way_converts_with_ordered_member_ids() {
        let raw = RawElement {
            kind: "way".to_string(),
            id: 2,
            nodes: vec![10, 11, 12],
            ..Default::default()
        };

        let element = convert(raw).unwrap();
        assert_eq!(
            element,
            Element::Way(Way {
                id: 2,
                member_ids: vec![10, 11, 12],
                tags: HashMap::new(),
            })
        );
    }

    #[test]
    fn test_relation_member_mapping() {
        let raw = RawElement {
            kind: "relation".to_string(),
            id: 3,
            members: vec![RawMember {
                kind: "way".to_string(),
                ref_id: 5,
                role: "outer".to_string(),
            }],
            ..Default::default()
        };

        match convert(raw).unwrap() {
            Element::Relation(r) => {
                assert_eq!(r.id, 3);
                assert_eq!(r.members.len(), 1);
                assert_eq!(r.members[0].member_type, MemberType::Way);
                assert_eq!(r.members[0].ref_id, 5);
                assert_eq!(r.members[0].role, "outer");
            }
            other => panic!("expected relation, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_kind_is_dropped() {
        let raw = RawElement {
            kind: "area".to_string(),
            id: 9,
            ..Default::default()
        };
        assert!(convert(raw).is_none());
    }

    #[test]
    fn test_unrecognized_member_kind_falls_back_to_point() {
        assert_eq!(member_type_from_wire("node"), MemberType::Point);
        assert_eq!(member_type_from_wire("way"), MemberType::Way);
        assert_eq!(member_type_from_wire("relation"), MemberType::Relation);
        assert_eq!(member_type_from_wire("area"), MemberType::Point);
        assert_eq!(member_type_from_wire(""), MemberType::Point);
    }
}
