//! # Layout Document Model
//!
//! A single type hierarchy used by the editor, the export/import files and
//! the storage slot.
//!
//! ```
//! use seatplan::layout::LayoutDocument;
//!
//! let json = r#"{
//!     "name": "Ground Floor",
//!     "elements": [
//!         {"id": "seat-1", "position": {"x": 100, "y": 100}, "size": {"width": 40, "height": 40},
//!          "attributes": {"kind": "seat", "number": "S1", "zone": "reading"}}
//!     ]
//! }"#;
//!
//! let doc = LayoutDocument::from_json(json).unwrap();
//! assert_eq!(doc.name.as_deref(), Some("Ground Floor"));
//! assert_eq!(doc.elements.len(), 1);
//! ```

pub mod filter;
pub mod smart;
pub mod templates;
pub mod types;

pub use filter::{KindFilter, hit_test, visible_elements};
pub use types::*;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::{Result, SeatplanError};

/// Summary counts written alongside the elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetadata {
    pub total_seats: usize,
    pub areas: usize,
    pub amenities: usize,
    /// RFC 3339 timestamp of when the document was written.
    pub created_at: String,
}

/// Export / storage document.
///
/// `name` and `metadata` are optional on input: older files and hand-written
/// layouts often carry only `elements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub elements: Vec<LayoutElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LayoutMetadata>,
}

impl LayoutDocument {
    /// Document for `elements`, stamped with the current time.
    pub fn new(name: &str, elements: Vec<LayoutElement>) -> Self {
        let stats = LayoutStats::of(&elements);
        Self {
            name: Some(name.to_string()),
            metadata: Some(LayoutMetadata {
                total_seats: stats.total_seats,
                areas: stats.areas,
                amenities: stats.amenities,
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            }),
            elements,
        }
    }

    /// Pretty-printed JSON, as written to export files and the storage slot.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a document.
    ///
    /// Fails with [`SeatplanError::ImportParse`] when the text is not JSON,
    /// lacks `elements`, has malformed elements, or repeats an element id.
    pub fn from_json(contents: &str) -> Result<Self> {
        let doc: LayoutDocument = serde_json::from_str(contents)
            .map_err(|e| SeatplanError::ImportParse(e.to_string()))?;

        let mut seen = HashSet::new();
        for (i, element) in doc.elements.iter().enumerate() {
            if element.id.trim().is_empty() {
                return Err(SeatplanError::ImportParse(format!(
                    "elements[{}]: empty id",
                    i
                )));
            }
            if !seen.insert(element.id.as_str()) {
                return Err(SeatplanError::ImportParse(format!(
                    "elements[{}]: duplicate id '{}'",
                    i, element.id
                )));
            }
            if element.size.width <= 0 || element.size.height <= 0 {
                return Err(SeatplanError::ImportParse(format!(
                    "elements[{}]: size must be positive",
                    i
                )));
            }
        }

        Ok(doc)
    }
}

/// Counts per kind and per seat zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutStats {
    pub total_seats: usize,
    pub areas: usize,
    pub amenities: usize,
    pub seats_by_zone: BTreeMap<Zone, usize>,
}

impl LayoutStats {
    pub fn of(elements: &[LayoutElement]) -> Self {
        let mut stats = LayoutStats::default();
        for element in elements {
            match &element.attributes {
                ElementAttributes::Seat(seat) => {
                    stats.total_seats += 1;
                    *stats.seats_by_zone.entry(seat.zone).or_default() += 1;
                }
                ElementAttributes::Area(_) => stats.areas += 1,
                ElementAttributes::Amenity(_) => stats.amenities += 1,
            }
        }
        stats
    }
}

/// Export file name for a layout: `<sanitized name>_layout.json`.
///
/// Runs of characters other than ASCII letters, digits, `-` and `_` collapse
/// to a single `_`; an empty result becomes `layout`.
pub fn export_file_name(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            stem.push(ch);
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_matches('_');
    let stem = if stem.is_empty() { "layout" } else { stem };
    format!("{}_layout.json", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn seat(id: &str, zone: Zone) -> LayoutElement {
        LayoutElement {
            id: id.into(),
            position: Position::new(0, 0),
            size: SEAT_SIZE,
            attributes: ElementAttributes::Seat(SeatAttributes {
                number: "S1".into(),
                zone,
                features: BTreeSet::new(),
                pricing: Pricing::STANDARD,
            }),
        }
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Ground Floor"), "Ground_Floor_layout.json");
        assert_eq!(export_file_name("  Hall #2 / East "), "Hall_2_East_layout.json");
        assert_eq!(export_file_name("study-hall_A"), "study-hall_A_layout.json");
        assert_eq!(export_file_name("***"), "layout_layout.json");
        assert_eq!(export_file_name(""), "layout_layout.json");
    }

    #[test]
    fn test_metadata_counts() {
        let doc = LayoutDocument::new("x", vec![seat("a", Zone::Silent), seat("b", Zone::Silent)]);
        let meta = doc.metadata.unwrap();
        assert_eq!(meta.total_seats, 2);
        assert_eq!(meta.areas, 0);
        assert!(meta.created_at.ends_with('Z'));
    }

    #[test]
    fn test_metadata_uses_camel_case() {
        let doc = LayoutDocument::new("x", vec![]);
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert!(json["metadata"]["totalSeats"].is_number());
        assert!(json["metadata"]["createdAt"].is_string());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = LayoutDocument::from_json("{not json").unwrap_err();
        assert!(matches!(err, SeatplanError::ImportParse(_)));
    }

    #[test]
    fn test_from_json_requires_elements() {
        let err = LayoutDocument::from_json(r#"{"name": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("elements"));
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let doc = LayoutDocument::new("x", vec![seat("a", Zone::Reading), seat("a", Zone::Reading)]);
        let err = LayoutDocument::from_json(&doc.to_json().unwrap()).unwrap_err();
        assert!(err.to_string().contains("duplicate id 'a'"));
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let json = r#"{"elements": [{"id": "x", "position": {"x": 0, "y": 0},
            "size": {"width": 10, "height": 10}, "attributes": {"kind": "stage"}}]}"#;
        assert!(LayoutDocument::from_json(json).is_err());
    }

    #[test]
    fn test_stats_by_zone() {
        let stats = LayoutStats::of(&[
            seat("a", Zone::Premium),
            seat("b", Zone::Premium),
            seat("c", Zone::Reading),
        ]);
        assert_eq!(stats.total_seats, 3);
        assert_eq!(stats.seats_by_zone[&Zone::Premium], 2);
        assert_eq!(stats.seats_by_zone[&Zone::Reading], 1);
        assert!(!stats.seats_by_zone.contains_key(&Zone::Silent));
    }
}
