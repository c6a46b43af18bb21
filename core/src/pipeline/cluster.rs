use crate::model::{FusedTarget, ProjectedPoint};

/// Empirical factor converting the configured merge distance (meters) into
/// the map-unit distance space used internally. Behavioral contract; do not
/// change.
const MERGE_SCALE: f64 = 5.0;

/// Greedily clusters projected points into fused targets.
///
/// Single pass in input order: each unclustered point seeds a cluster and
/// absorbs every later unclustered point within threshold OF THE SEED. This
/// is deliberately not transitive union-find; a chain of near points splits
/// once it strays past the threshold from the seed, and results depend on
/// input order.
pub fn cluster(points: &[ProjectedPoint], merge_distance_m: f64) -> Vec<FusedTarget> {
    if points.is_empty() {
        return Vec::new();
    }

    let threshold = merge_distance_m * MERGE_SCALE;
    let mut used = vec![false; points.len()];
    let mut clusters: Vec<Vec<&ProjectedPoint>> = Vec::new();

    for i in 0..points.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let mut members = vec![&points[i]];

        for j in (i + 1)..points.len() {
            if used[j] {
                continue;
            }
            if distance(&points[i], &points[j]) < threshold {
                used[j] = true;
                members.push(&points[j]);
            }
        }
        clusters.push(members);
    }

    clusters
        .into_iter()
        .enumerate()
        .map(|(idx, members)| fuse(idx, &members))
        .collect()
}

/// Geometry-aware distance between two projected points.
///
/// A 1D detection resolves range but not bearing, so against a 1D point the
/// distance is the difference of ranges from that point's radar origin.
/// Without an origin, or when both points are 1D, fall back to Euclidean.
fn distance(a: &ProjectedPoint, b: &ProjectedPoint) -> f64 {
    if a.is_1d != b.is_1d {
        let origin = if a.is_1d { a.radar_origin } else { b.radar_origin };
        if let Some((ox, oy)) = origin {
            let ra = ((a.left - ox).powi(2) + (a.top - oy).powi(2)).sqrt();
            let rb = ((b.left - ox).powi(2) + (b.top - oy).powi(2)).sqrt();
            return (ra - rb).abs();
        }
    }
    euclidean(a, b)
}

fn euclidean(a: &ProjectedPoint, b: &ProjectedPoint) -> f64 {
    ((a.left - b.left).powi(2) + (a.top - b.top).powi(2)).sqrt()
}

fn fuse(index: usize, members: &[&ProjectedPoint]) -> FusedTarget {
    let two_d: Vec<&&ProjectedPoint> = members.iter().filter(|p| !p.is_1d).collect();
    let (avg_x, avg_y) = if !two_d.is_empty() {
        centroid(two_d.iter().map(|p| (p.left, p.top)))
    } else {
        centroid(members.iter().map(|p| (p.left, p.top)))
    };

    FusedTarget {
        id: format!("target_{}", index + 1),
        x: round2(avg_x),
        y: round2(avg_y),
        count: members.len(),
        sources: members
            .iter()
            .map(|p| format!("{}:{}", p.radar, p.slot))
            .collect(),
    }
}

fn centroid(points: impl Iterator<Item = (f64, f64)>) -> (f64, f64) {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut n = 0usize;
    for (x, y) in points {
        sum_x += x;
        sum_y += y;
        n += 1;
    }
    (sum_x / n as f64, sum_y / n as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_2d(radar: &str, slot: u8, left: f64, top: f64) -> ProjectedPoint {
        ProjectedPoint {
            left,
            top,
            radar: radar.to_string(),
            slot,
            is_1d: false,
            radar_origin: None,
        }
    }

    fn point_1d(radar: &str, left: f64, top: f64, origin: (f64, f64)) -> ProjectedPoint {
        ProjectedPoint {
            left,
            top,
            radar: radar.to_string(),
            slot: 1,
            is_1d: true,
            radar_origin: Some(origin),
        }
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        // merge_distance 0.8 -> threshold 4.0 map units.
        let near = [
            point_2d("a", 1, 0.0, 0.0),
            point_2d("b", 1, 3.999, 0.0),
        ];
        assert_eq!(cluster(&near, 0.8).len(), 1);

        let far = [point_2d("a", 1, 0.0, 0.0), point_2d("b", 1, 4.001, 0.0)];
        assert_eq!(cluster(&far, 0.8).len(), 2);
    }

    #[test]
    fn greedy_seed_distance_is_not_transitive() {
        // b is near both a and c, but c is past the threshold from seed a.
        let chain = [
            point_2d("a", 1, 0.0, 0.0),
            point_2d("b", 1, 3.0, 0.0),
            point_2d("c", 1, 6.0, 0.0),
        ];
        let fused = cluster(&chain, 0.8);
        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0].count, 2);
        assert_eq!(fused[0].sources, vec!["a:1", "b:1"]);
        assert_eq!(fused[1].sources, vec!["c:1"]);
    }

    #[test]
    fn output_is_deterministic_and_ordered() {
        let points = [
            point_2d("b", 2, 10.0, 10.0),
            point_2d("a", 1, 0.0, 0.0),
            point_2d("c", 3, 10.5, 10.0),
        ];
        let first = cluster(&points, 0.8);
        let second = cluster(&points, 0.8);
        assert_eq!(first, second);
        assert_eq!(first[0].id, "target_1");
        assert_eq!(first[0].sources, vec!["b:2", "c:3"]);
        assert_eq!(first[1].id, "target_2");
    }

    #[test]
    fn one_d_point_merges_by_range_difference() {
        // 1D point 5.0 units from its origin; 2D point at a different
        // bearing but nearly the same range.
        let points = [
            point_1d("hall", 0.0, 5.0, (0.0, 0.0)),
            point_2d("wall", 1, 3.0, 4.0),
        ];
        let fused = cluster(&points, 0.8);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].count, 2);
        // Centroid prefers 2D members.
        assert_eq!(fused[0].x, 3.0);
        assert_eq!(fused[0].y, 4.0);
    }

    #[test]
    fn one_d_without_origin_falls_back_to_euclidean() {
        let mut lone = point_1d("hall", 0.0, 5.0, (0.0, 0.0));
        lone.radar_origin = None;
        let points = [lone, point_2d("wall", 1, 3.0, 4.0)];
        // Euclidean distance sqrt(9+1) > 0.24*5, so they stay apart.
        assert_eq!(cluster(&points, 0.24).len(), 2);
    }

    #[test]
    fn two_one_d_points_use_euclidean() {
        let points = [
            point_1d("a", 0.0, 5.0, (0.0, 0.0)),
            point_1d("b", 0.0, 8.9, (0.0, 0.0)),
        ];
        let fused = cluster(&points, 0.8);
        assert_eq!(fused.len(), 1);
        // 1D-only cluster averages all members.
        assert_eq!(fused[0].y, 6.95);
    }

    #[test]
    fn centroid_rounds_to_two_decimals() {
        let points = [
            point_2d("a", 1, 1.0, 0.0),
            point_2d("b", 1, 1.005, 0.0),
        ];
        let fused = cluster(&points, 1.0);
        assert_eq!(fused[0].x, 1.0);
    }
}
