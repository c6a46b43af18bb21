use crate::geometry::polygon;
use crate::model::Zone;

/// True when the point sits inside any valid exclusion polygon.
pub fn excluded(x: f64, y: f64, zones: &[Zone]) -> bool {
    zones
        .iter()
        .filter(|zone| zone.is_valid())
        .any(|zone| polygon::contains(x, y, &zone.points))
}

/// Monitor-zone gate for a radar's own detections.
///
/// Radars with no monitor zones keep everything; otherwise the point must
/// fall inside at least one valid monitor polygon. Invalid polygons never
/// match, so a radar configured with only degenerate monitor zones keeps
/// nothing.
pub fn monitored(x: f64, y: f64, zones: &[Zone]) -> bool {
    if zones.is_empty() {
        return true;
    }
    zones
        .iter()
        .filter(|zone| zone.is_valid())
        .any(|zone| polygon::contains(x, y, &zone.points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ZonePoint;

    fn square(name: &str, size: f64) -> Zone {
        Zone {
            name: name.to_string(),
            points: vec![
                ZonePoint::new(0.0, 0.0),
                ZonePoint::new(size, 0.0),
                ZonePoint::new(size, size),
                ZonePoint::new(0.0, size),
            ],
            delay: 0.0,
        }
    }

    #[test]
    fn exclusion_matches_any_zone() {
        let zones = vec![square("a", 2.0), square("b", 8.0)];
        assert!(excluded(5.0, 5.0, &zones));
        assert!(!excluded(9.0, 9.0, &zones));
    }

    #[test]
    fn no_monitor_zones_keeps_everything() {
        assert!(monitored(100.0, 100.0, &[]));
    }

    #[test]
    fn monitor_zone_restricts_points() {
        let zones = vec![square("watch", 4.0)];
        assert!(monitored(2.0, 2.0, &zones));
        assert!(!monitored(6.0, 6.0, &zones));
    }

    #[test]
    fn invalid_zones_are_ignored() {
        let degenerate = Zone {
            name: "broken".to_string(),
            points: vec![ZonePoint::new(0.0, 0.0)],
            delay: 0.0,
        };
        assert!(!excluded(0.0, 0.0, std::slice::from_ref(&degenerate)));
        // A degenerate monitor zone never matches, so it keeps nothing.
        assert!(!monitored(50.0, 50.0, std::slice::from_ref(&degenerate)));
    }
}
