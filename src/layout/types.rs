//! Element types for the layout document model.
//!
//! All types derive `Serialize + Deserialize` so the same values are used by
//! the editor, the export/import files, and the storage slot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Seat footprint in canvas units.
pub const SEAT_SIZE: Size = Size {
    width: 40,
    height: 40,
};

/// Amenity footprint in canvas units.
pub const AMENITY_SIZE: Size = Size {
    width: 60,
    height: 60,
};

/// Default area footprint when a template does not override it.
pub const AREA_SIZE: Size = Size {
    width: 200,
    height: 150,
};

/// Integer canvas coordinate of an element's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by the same amount on both axes, saturating at the `i32` bounds.
    pub fn offset(self, delta: i32) -> Self {
        Self::new(self.x.saturating_add(delta), self.y.saturating_add(delta))
    }
}

/// Element footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Raw pointer coordinate, before grid snapping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Position> for Point {
    fn from(p: Position) -> Self {
        Self::new(f64::from(p.x), f64::from(p.y))
    }
}

// ============================================================================
// KINDS
// ============================================================================

/// What an element is. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Seat,
    Area,
    Amenity,
}

impl ElementKind {
    pub const ALL: [ElementKind; 3] = [ElementKind::Seat, ElementKind::Area, ElementKind::Amenity];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Seat => "seat",
            ElementKind::Area => "area",
            ElementKind::Amenity => "amenity",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seat" | "seats" => Ok(ElementKind::Seat),
            "area" | "areas" => Ok(ElementKind::Area),
            "amenity" | "amenities" => Ok(ElementKind::Amenity),
            other => Err(format!(
                "unknown element kind '{}' (expected seat, area or amenity)",
                other
            )),
        }
    }
}

// ============================================================================
// SEAT PAYLOAD
// ============================================================================

/// Seating zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    Silent,
    Reading,
    Discussion,
    ExamPrep,
    Premium,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::Silent,
        Zone::Reading,
        Zone::Discussion,
        Zone::ExamPrep,
        Zone::Premium,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Silent => "silent",
            Zone::Reading => "reading",
            Zone::Discussion => "discussion",
            Zone::ExamPrep => "exam-prep",
            Zone::Premium => "premium",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::ALL
            .into_iter()
            .find(|z| z.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                format!(
                    "unknown zone '{}' (expected one of: {})",
                    s,
                    Zone::ALL.map(Zone::as_str).join(", ")
                )
            })
    }
}

/// Seat rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pricing {
    pub hourly: u32,
    pub daily: u32,
    pub weekly: u32,
    pub monthly: u32,
}

impl Pricing {
    /// Rates given to a seat placed by hand.
    pub const STANDARD: Self = Self {
        hourly: 50,
        daily: 300,
        weekly: 1800,
        monthly: 6500,
    };
}

impl Default for Pricing {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAttributes {
    pub number: String,
    pub zone: Zone,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub pricing: Pricing,
}

// ============================================================================
// AREA / AMENITY PAYLOADS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaAttributes {
    pub name: String,
    pub area_type: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityAttributes {
    pub name: String,
    pub amenity_type: String,
    pub icon: String,
}

/// Kind-specific payload. The variant is the element's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementAttributes {
    Seat(SeatAttributes),
    Area(AreaAttributes),
    Amenity(AmenityAttributes),
}

impl ElementAttributes {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementAttributes::Seat(_) => ElementKind::Seat,
            ElementAttributes::Area(_) => ElementKind::Area,
            ElementAttributes::Amenity(_) => ElementKind::Amenity,
        }
    }
}

// ============================================================================
// ELEMENT
// ============================================================================

/// A seat, area, or amenity placed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutElement {
    pub id: String,
    pub position: Position,
    pub size: Size,
    pub attributes: ElementAttributes,
}

impl LayoutElement {
    pub fn kind(&self) -> ElementKind {
        self.attributes.kind()
    }

    /// Text shown on the canvas and matched by search: the seat number, or
    /// the area/amenity name.
    pub fn label(&self) -> &str {
        match &self.attributes {
            ElementAttributes::Seat(seat) => &seat.number,
            ElementAttributes::Area(area) => &area.name,
            ElementAttributes::Amenity(amenity) => &amenity.name,
        }
    }

    pub fn as_seat(&self) -> Option<&SeatAttributes> {
        match &self.attributes {
            ElementAttributes::Seat(seat) => Some(seat),
            _ => None,
        }
    }

    /// Whether `point` falls inside the element's footprint (edges inclusive
    /// on the top/left, exclusive on the bottom/right).
    pub fn contains(&self, point: Point) -> bool {
        let left = f64::from(self.position.x);
        let top = f64::from(self.position.y);
        point.x >= left
            && point.y >= top
            && point.x < left + f64::from(self.size.width)
            && point.y < top + f64::from(self.size.height)
    }
}
