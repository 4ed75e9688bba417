//! Smart layout generator.
//!
//! Produces the fixed "start fresh" arrangement: entrance, washroom and
//! lunch areas along the edges, and a 6 x 8 block of seats in the middle.
//!
//! ```text
//! ┌────────────┐                                   ┌──────────┐
//! │  Entrance  │                                   │ Washroom │
//! └────────────┘   S1  S2  S3  S4  S5  S6  S7  S8  └──────────┘   premium
//!                  S9  ...                 S16                    premium
//!                  S17 ...                 S24                    silent
//!                  S25 ...                 S32                    silent
//!                  S33 ...                 S40                    reading
//!                  S41 ...                 S48     ┌──────────┐   reading
//!                                                  │  Lunch   │
//!                                                  └──────────┘
//! ```

use std::collections::BTreeSet;

use super::templates;
use super::types::{
    AreaAttributes, ElementAttributes, ElementKind, LayoutElement, Position, Pricing, SEAT_SIZE,
    SeatAttributes, Zone,
};

pub const SMART_ROWS: usize = 6;
pub const SMART_COLS: usize = 8;

/// Top-left seat of the block.
const SEAT_ORIGIN: Position = Position::new(240, 140);

/// Distance between neighbouring seat origins.
const SEAT_PITCH: i32 = 60;

/// Rates given to every generated seat.
pub const SMART_PRICING: Pricing = Pricing {
    hourly: 60,
    daily: 350,
    weekly: 2000,
    monthly: 7000,
};

/// (template key, position) for the generated areas.
const SMART_AREAS: &[(&str, Position)] = &[
    ("entrance", Position::new(20, 20)),
    ("washroom", Position::new(1000, 20)),
    ("lunch", Position::new(1000, 600)),
];

/// Zone for a seat row in the generated block.
pub fn zone_for_row(row: usize) -> Zone {
    if row < 2 {
        Zone::Premium
    } else if row < 4 {
        Zone::Silent
    } else {
        Zone::Reading
    }
}

/// Build the smart layout. `next_id` supplies a fresh id per element.
pub fn smart_layout(mut next_id: impl FnMut(ElementKind) -> String) -> Vec<LayoutElement> {
    let mut elements = Vec::with_capacity(SMART_AREAS.len() + SMART_ROWS * SMART_COLS);

    for &(key, position) in SMART_AREAS {
        // Keys are from the static table above.
        let Some(template) = templates::area_by_key(key) else {
            continue;
        };
        elements.push(LayoutElement {
            id: next_id(ElementKind::Area),
            position,
            size: template.size,
            attributes: ElementAttributes::Area(AreaAttributes {
                name: template.name.to_string(),
                area_type: template.key.to_string(),
                color: template.color.to_string(),
            }),
        });
    }

    for row in 0..SMART_ROWS {
        for col in 0..SMART_COLS {
            let number = row * SMART_COLS + col + 1;
            elements.push(LayoutElement {
                id: next_id(ElementKind::Seat),
                position: Position::new(
                    SEAT_ORIGIN.x + col as i32 * SEAT_PITCH,
                    SEAT_ORIGIN.y + row as i32 * SEAT_PITCH,
                ),
                size: SEAT_SIZE,
                attributes: ElementAttributes::Seat(SeatAttributes {
                    number: format!("S{}", number),
                    zone: zone_for_row(row),
                    features: BTreeSet::new(),
                    pricing: SMART_PRICING,
                }),
            });
        }
    }

    elements
}
