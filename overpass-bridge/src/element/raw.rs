//! Untyped decoded intermediate for one upstream element.

use std::collections::HashMap;

use serde::Deserialize;

/// One element exactly as decoded from the upstream `elements` array.
///
/// All type-dependent fields are optional on the wire: `lat`/`lon` only
/// accompany nodes, `nodes` only ways, `members` only relations. Missing
/// fields default so a single struct can absorb any element kind; the
/// [`convert`](super::convert) step then picks the fields that matter.
///
/// Values are created fresh per decoded JSON object and discarded once
/// converted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawElement {
    /// Upstream kind string: `node`, `way`, `relation`, or anything else.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    /// Ordered point references (ways only).
    #[serde(default)]
    pub nodes: Vec<i64>,
    /// Ordered typed members (relations only).
    #[serde(default)]
    pub members: Vec<RawMember>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// One relation member as decoded from upstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMember {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "ref", default)]
    pub ref_id: i64,
    #[serde(default)]
    pub role: String,
}
