//! View-only projection of the element list.
//!
//! Filtering decides what is rendered and hit-testable. It never changes the
//! element list or the history.

use std::fmt;
use std::str::FromStr;

use super::types::{ElementKind, LayoutElement, Point};

/// Kind filter selected in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(ElementKind),
}

impl KindFilter {
    pub fn matches(self, kind: ElementKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(k) => k == kind,
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindFilter::All => f.write_str("all"),
            KindFilter::Only(kind) => kind.fmt(f),
        }
    }
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(KindFilter::All)
        } else {
            s.parse().map(KindFilter::Only)
        }
    }
}

/// Elements passing the kind filter whose label contains `search`
/// (case-insensitive). An empty or blank search matches everything.
pub fn visible_elements<'a>(
    all: &'a [LayoutElement],
    kind_filter: KindFilter,
    search: &str,
) -> Vec<&'a LayoutElement> {
    let needle = search.trim().to_lowercase();
    all.iter()
        .filter(|e| kind_filter.matches(e.kind()))
        .filter(|e| needle.is_empty() || e.label().to_lowercase().contains(&needle))
        .collect()
}

/// Topmost element under `point`. Later elements are drawn above earlier ones.
pub fn hit_test<'a>(visible: &[&'a LayoutElement], point: Point) -> Option<&'a LayoutElement> {
    visible.iter().rev().find(|e| e.contains(point)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::*;
    use std::collections::BTreeSet;

    fn seat(id: &str, number: &str, x: i32) -> LayoutElement {
        LayoutElement {
            id: id.into(),
            position: Position::new(x, 0),
            size: SEAT_SIZE,
            attributes: ElementAttributes::Seat(SeatAttributes {
                number: number.into(),
                zone: Zone::Reading,
                features: BTreeSet::new(),
                pricing: Pricing::STANDARD,
            }),
        }
    }

    fn area(id: &str, name: &str) -> LayoutElement {
        LayoutElement {
            id: id.into(),
            position: Position::new(0, 0),
            size: AREA_SIZE,
            attributes: ElementAttributes::Area(AreaAttributes {
                name: name.into(),
                area_type: "reception".into(),
                color: "#9c27b0".into(),
            }),
        }
    }

    fn ids(v: &[&LayoutElement]) -> Vec<String> {
        v.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_all_with_empty_search_is_everything() {
        let all = vec![seat("a", "S1", 0), area("b", "Reception")];
        assert_eq!(ids(&visible_elements(&all, KindFilter::All, "")), ["a", "b"]);
    }

    #[test]
    fn test_kind_filter() {
        let all = vec![seat("a", "S1", 0), area("b", "Reception")];
        let v = visible_elements(&all, KindFilter::Only(ElementKind::Area), "");
        assert_eq!(ids(&v), ["b"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let all = vec![
            seat("a", "S1", 0),
            seat("b", "S12", 40),
            area("c", "Silent Hall"),
        ];
        assert_eq!(ids(&visible_elements(&all, KindFilter::All, "s1")), ["a", "b"]);
        assert_eq!(ids(&visible_elements(&all, KindFilter::All, "HALL")), ["c"]);
        assert_eq!(
            ids(&visible_elements(&all, KindFilter::Only(ElementKind::Seat), "silent")),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let all = vec![area("under", "Reception"), seat("over", "S1", 0)];
        let visible = visible_elements(&all, KindFilter::All, "");
        let hit = hit_test(&visible, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(hit.id, "over");
        assert!(hit_test(&visible, Point::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<KindFilter>().unwrap(), KindFilter::All);
        assert_eq!(
            "Seat".parse::<KindFilter>().unwrap(),
            KindFilter::Only(ElementKind::Seat)
        );
        assert!("desk".parse::<KindFilter>().is_err());
    }
}
