use crate::model::{RawPoint, Reading, ReadingSource};

/// Raw 1D range readings below this value (pre-conversion) are sensor noise.
const MIN_RANGE: f64 = 0.1;

/// Reads up to one normalized point per detection slot for a radar.
///
/// 2D slots need both paired readings present and finite; otherwise the slot
/// yields nothing. Slot 1 alone falls back to the range-only reading, tagged
/// 1D with the range on the forward axis. Pure read + transform.
pub fn read_radar(radar: &str, source: &dyn ReadingSource) -> Vec<RawPoint> {
    let mut points = Vec::new();

    for slot in 1..=3u8 {
        if let Some(point) = read_slot(radar, slot, source) {
            points.push(point);
        } else if slot == 1 {
            if let Some(point) = read_range(radar, source) {
                points.push(point);
            }
        }
    }

    points
}

fn read_slot(radar: &str, slot: u8, source: &dyn ReadingSource) -> Option<RawPoint> {
    let (x, y) = source.slot_pair(radar, slot)?;
    if !x.value.is_finite() || !y.value.is_finite() {
        return None;
    }
    Some(RawPoint {
        x_mm: x.millimeters(),
        y_mm: y.millimeters(),
        z_mm: 0.0,
        slot,
        is_1d: false,
    })
}

fn read_range(radar: &str, source: &dyn ReadingSource) -> Option<RawPoint> {
    let range: Reading = source.range(radar)?;
    if !range.value.is_finite() || range.value < MIN_RANGE {
        return None;
    }
    Some(RawPoint {
        x_mm: 0.0,
        y_mm: range.millimeters(),
        z_mm: 0.0,
        slot: 1,
        is_1d: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Unit;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeSource {
        pairs: HashMap<u8, (Reading, Reading)>,
        range: Option<Reading>,
    }

    impl ReadingSource for FakeSource {
        fn slot_pair(&self, _radar: &str, slot: u8) -> Option<(Reading, Reading)> {
            self.pairs.get(&slot).copied()
        }

        fn range(&self, _radar: &str) -> Option<Reading> {
            self.range
        }
    }

    #[test]
    fn converts_meters_and_centimeters_to_millimeters() {
        let mut source = FakeSource::default();
        source.pairs.insert(
            1,
            (
                Reading::new(1.2, Unit::Meters),
                Reading::new(0.5, Unit::Meters),
            ),
        );
        source.pairs.insert(
            2,
            (
                Reading::new(120.0, Unit::Centimeters),
                Reading::new(50.0, Unit::Centimeters),
            ),
        );

        let points = read_radar("living", &source);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x_mm, 1200.0);
        assert_eq!(points[0].y_mm, 500.0);
        assert_eq!(points[1].x_mm, 1200.0);
        assert_eq!(points[1].y_mm, 500.0);
        assert!(!points[0].is_1d);
    }

    #[test]
    fn unknown_unit_is_passed_through_unscaled() {
        let mut source = FakeSource::default();
        source.pairs.insert(
            1,
            (
                Reading::new(800.0, Unit::Unknown),
                Reading::new(600.0, Unit::Unknown),
            ),
        );
        let points = read_radar("living", &source);
        assert_eq!(points[0].x_mm, 800.0);
        assert_eq!(points[0].y_mm, 600.0);
    }

    #[test]
    fn slot_one_falls_back_to_range() {
        let source = FakeSource {
            range: Some(Reading::new(2.5, Unit::Meters)),
            ..Default::default()
        };
        let points = read_radar("hall", &source);
        assert_eq!(points.len(), 1);
        let point = &points[0];
        assert!(point.is_1d);
        assert_eq!(point.slot, 1);
        assert_eq!(point.x_mm, 0.0);
        assert_eq!(point.y_mm, 2500.0);
    }

    #[test]
    fn short_range_is_discarded_as_noise() {
        let source = FakeSource {
            range: Some(Reading::new(0.05, Unit::Meters)),
            ..Default::default()
        };
        assert!(read_radar("hall", &source).is_empty());
    }

    #[test]
    fn range_does_not_replace_an_available_pair() {
        let mut source = FakeSource {
            range: Some(Reading::new(9.0, Unit::Meters)),
            ..Default::default()
        };
        source.pairs.insert(
            1,
            (
                Reading::new(1.0, Unit::Meters),
                Reading::new(1.0, Unit::Meters),
            ),
        );
        let points = read_radar("hall", &source);
        assert_eq!(points.len(), 1);
        assert!(!points[0].is_1d);
    }

    #[test]
    fn non_finite_readings_skip_the_slot() {
        let mut source = FakeSource::default();
        source.pairs.insert(
            1,
            (
                Reading::new(f64::NAN, Unit::Meters),
                Reading::new(1.0, Unit::Meters),
            ),
        );
        assert!(read_radar("hall", &source).is_empty());
    }
}
