//! Named area and amenity templates.
//!
//! Placement looks up a template by its type key; unknown keys are an
//! error, never a blank element.

use super::types::{AREA_SIZE, Position, Size};

/// A named area preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub size: Size,
}

/// A named amenity preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmenityTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Where new areas land before the user drags them into place.
pub const AREA_DROP_POSITION: Position = Position::new(40, 40);

/// Where new amenities land.
pub const AMENITY_DROP_POSITION: Position = Position::new(300, 40);

pub const AREA_TEMPLATES: &[AreaTemplate] = &[
    AreaTemplate {
        key: "entrance",
        name: "Entrance",
        color: "#4caf50",
        size: Size::new(160, 80),
    },
    AreaTemplate {
        key: "washroom",
        name: "Washroom",
        color: "#2196f3",
        size: Size::new(160, 100),
    },
    AreaTemplate {
        key: "lunch",
        name: "Lunch Area",
        color: "#ff9800",
        size: Size::new(180, 140),
    },
    AreaTemplate {
        key: "reception",
        name: "Reception",
        color: "#9c27b0",
        size: AREA_SIZE,
    },
    AreaTemplate {
        key: "discussion-room",
        name: "Discussion Room",
        color: "#00bcd4",
        size: AREA_SIZE,
    },
    AreaTemplate {
        key: "locker-room",
        name: "Locker Room",
        color: "#795548",
        size: Size::new(120, 100),
    },
];

pub const AMENITY_TEMPLATES: &[AmenityTemplate] = &[
    AmenityTemplate {
        key: "water-cooler",
        name: "Water Cooler",
        icon: "water_drop",
    },
    AmenityTemplate {
        key: "printer",
        name: "Printer",
        icon: "print",
    },
    AmenityTemplate {
        key: "wifi",
        name: "WiFi Router",
        icon: "wifi",
    },
    AmenityTemplate {
        key: "charging-station",
        name: "Charging Station",
        icon: "power",
    },
    AmenityTemplate {
        key: "air-conditioner",
        name: "Air Conditioner",
        icon: "ac_unit",
    },
    AmenityTemplate {
        key: "coffee",
        name: "Coffee Machine",
        icon: "local_cafe",
    },
];

/// Look up an area template by key (case-insensitive).
pub fn area_by_key(key: &str) -> Option<&'static AreaTemplate> {
    let key = key.to_lowercase();
    AREA_TEMPLATES.iter().find(|t| t.key == key)
}

/// Look up an amenity template by key (case-insensitive).
pub fn amenity_by_key(key: &str) -> Option<&'static AmenityTemplate> {
    let key = key.to_lowercase();
    AMENITY_TEMPLATES.iter().find(|t| t.key == key)
}

/// List area template keys.
pub fn area_types() -> Vec<&'static str> {
    AREA_TEMPLATES.iter().map(|t| t.key).collect()
}

/// List amenity template keys.
pub fn amenity_types() -> Vec<&'static str> {
    AMENITY_TEMPLATES.iter().map(|t| t.key).collect()
}
