//! Element id generation.
//!
//! Ids look like `seat-1718000000000-7`: kind prefix, creation time in
//! milliseconds, and a per-editor counter. The counter keeps ids distinct
//! when several elements are created within the same millisecond.

use chrono::Utc;

use crate::layout::{ElementKind, LayoutElement};

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    /// Pinned timestamp, used instead of the wall clock when set.
    fixed_millis: Option<i64>,
    counter: u64,
}

impl IdGenerator {
    /// Generator stamping ids with the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator with a pinned timestamp, for reproducible ids.
    pub fn with_fixed_time(millis: i64) -> Self {
        Self {
            fixed_millis: Some(millis),
            counter: 0,
        }
    }

    /// Next id for `kind`.
    pub fn next_id(&mut self, kind: ElementKind) -> String {
        self.counter += 1;
        let millis = self
            .fixed_millis
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        format!("{}-{}-{}", kind, millis, self.counter)
    }

    /// Next id for `kind` that no element in `existing` already uses.
    ///
    /// Imported layouts may carry ids this generator would also produce.
    pub fn next_unique(&mut self, kind: ElementKind, existing: &[LayoutElement]) -> String {
        loop {
            let id = self.next_id(kind);
            if !existing.iter().any(|e| e.id == id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{AMENITY_SIZE, AmenityAttributes, ElementAttributes, Position};

    #[test]
    fn test_ids_carry_kind_prefix() {
        let mut ids = IdGenerator::new();
        assert!(ids.next_id(ElementKind::Seat).starts_with("seat-"));
        assert!(ids.next_id(ElementKind::Amenity).starts_with("amenity-"));
    }

    #[test]
    fn test_counter_separates_same_millisecond() {
        let mut ids = IdGenerator::with_fixed_time(1000);
        assert_eq!(ids.next_id(ElementKind::Seat), "seat-1000-1");
        assert_eq!(ids.next_id(ElementKind::Seat), "seat-1000-2");
    }

    #[test]
    fn test_next_unique_skips_taken_ids() {
        let taken = LayoutElement {
            id: "amenity-5-1".into(),
            position: Position::new(0, 0),
            size: AMENITY_SIZE,
            attributes: ElementAttributes::Amenity(AmenityAttributes {
                name: "Printer".into(),
                amenity_type: "printer".into(),
                icon: "print".into(),
            }),
        };
        let mut ids = IdGenerator::with_fixed_time(5);
        assert_eq!(
            ids.next_unique(ElementKind::Amenity, &[taken]),
            "amenity-5-2"
        );
    }
}
