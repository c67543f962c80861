//! Typed element model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A geodata element in its typed form.
///
/// This is the discriminated union handed to consumers: exactly one of the
/// three recognized element kinds. The serde encoding is internally tagged
/// on `type`, so a serialized element stays self-describing while remaining
/// far more compact than the upstream document it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// A single coordinate pair with tags.
    Point(Point),
    /// An ordered sequence of point references forming a line or boundary.
    Way(Way),
    /// A grouping of other elements by reference, each with a role.
    Relation(Relation),
}

impl Element {
    /// Returns the element's upstream identifier.
    pub fn id(&self) -> i64 {
        match self {
            Element::Point(p) => p.id,
            Element::Way(w) => w.id,
            Element::Relation(r) => r.id,
        }
    }

    /// Returns the element's tag mapping.
    pub fn tags(&self) -> &HashMap<String, String> {
        match self {
            Element::Point(p) => &p.tags,
            Element::Way(w) => &w.tags,
            Element::Relation(r) => &r.tags,
        }
    }
}

/// A point element: one coordinate pair plus tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// A way element: an ordered list of point identifiers plus tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: i64,
    pub member_ids: Vec<i64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// A relation element: an ordered list of typed members plus tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: i64,
    pub members: Vec<Member>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// One member of a relation: a reference to another element with a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "type")]
    pub member_type: MemberType,
    #[serde(rename = "ref")]
    pub ref_id: i64,
    pub role: String,
}

/// The kind of element a relation member refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Point,
    Way,
    Relation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_accessor() {
        let element = Element::Way(Way {
            id: 42,
            member_ids: vec![1, 2],
            tags: HashMap::new(),
        });
        assert_eq!(element.id(), 42);
    }

    #[test]
    fn test_element_serializes_with_type_tag() {
        let element = Element::Point(Point {
            id: 1,
            lat: 52.5,
            lon: 13.4,
            tags: HashMap::new(),
        });
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "point");
        assert_eq!(json["id"], 1);
        assert_eq!(json["lat"], 52.5);
    }

    #[test]
    fn test_member_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&MemberType::Relation).unwrap(),
            "\"relation\""
        );
        assert_eq!(serde_json::to_string(&MemberType::Point).unwrap(), "\"point\"");
    }
}
